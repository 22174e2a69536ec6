//! Spatial eligibility checker.
//!
//! Decides whether an actor may create a zone right now. A pure query over
//! external world state and the registry: no side effects, purely advisory
//! to the orchestrator.

use crate::core::{ObjectId, PlayerId, ZoneError, ZoneSettings};
use crate::registry::ZoneRegistry;
use crate::world::World;

/// How close the actor must be to their anchor, in world distance units.
pub const ANCHOR_SEARCH_RADIUS: f32 = 5.0;

/// Find the anchor a new zone for `actor` would surround.
///
/// Checks, in order:
/// 1. a qualifying anchor within [`ANCHOR_SEARCH_RADIUS`] of the actor that
///    the actor is authorized on and actually owns, since authorization
///    lists may include non-owners;
/// 2. no anchor inside the exclusion radius that the actor lacks
///    authorization on, so a zone can't trap an unauthorized neighbor;
/// 3. the actor doesn't already have a zone.
pub fn check_eligibility(
    world: &dyn World,
    registry: &ZoneRegistry,
    settings: &ZoneSettings,
    actor: PlayerId,
) -> Result<ObjectId, ZoneError> {
    let standing_at = world.actor_position(actor).ok_or(ZoneError::NoOwnedAnchor)?;

    let nearby = world.anchors_near(standing_at, ANCHOR_SEARCH_RADIUS);
    let anchor = nearby
        .iter()
        .copied()
        .find(|&candidate| world.is_authorized(candidate, actor))
        .ok_or(ZoneError::NoOwnedAnchor)?;

    if world.owner_of(anchor) != Some(actor) {
        return Err(ZoneError::NoOwnedAnchor);
    }

    let center = world.position(anchor).ok_or(ZoneError::NoOwnedAnchor)?;
    let exclusion_radius = settings.exclusion_radius();
    let foreign = world
        .anchors_near(center, exclusion_radius)
        .iter()
        .any(|&neighbor| !world.is_authorized(neighbor, actor));
    if foreign {
        return Err(ZoneError::ForeignAnchorNearby);
    }

    if registry.contains_owner(actor) {
        return Err(ZoneError::AlreadyHasZone);
    }

    Ok(anchor)
}
