//! The world contract.
//!
//! The game simulation that owns buildings, positions, and spatial queries
//! lives outside this crate. The engine sees it through [`World`]: a spatial
//! index over anchor objects, an authorization check, and a marker entity
//! factory.
//!
//! The world is an arena this crate does not control. Records hold
//! [`ObjectId`]s into it, and any of them can stop resolving between calls.
//! `Option` returns model that, and callers treat `None` as a normal
//! lifecycle outcome.

pub mod geometry;

use smallvec::SmallVec;

use crate::core::{ObjectId, PlayerId};

pub use geometry::Position;

/// How a spawned marker should look. Derived from [`crate::ZoneSettings`].
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerAppearance {
    /// HTML color string, e.g. `#FF0000`.
    pub color: String,
    /// Marker transparency.
    pub alpha: f32,
    /// Marker radius on the map.
    pub radius: f32,
}

impl crate::core::ZoneSettings {
    /// Marker appearance for zones created under these settings.
    #[must_use]
    pub fn marker_appearance(&self) -> MarkerAppearance {
        MarkerAppearance {
            color: self.marker_color.clone(),
            alpha: self.marker_alpha,
            radius: self.marker_size,
        }
    }
}

/// Spatial index, authorization oracle, and entity factory of the host world.
pub trait World {
    /// Anchor objects within `radius` of `center`, nearest-first not
    /// required; implementations should return a deterministic order.
    fn anchors_near(&self, center: Position, radius: f32) -> SmallVec<[ObjectId; 8]>;

    /// Whether the object still exists in the world.
    fn contains(&self, object: ObjectId) -> bool;

    /// Position of a live object.
    fn position(&self, object: ObjectId) -> Option<Position>;

    /// Whether the actor is on the anchor's authorization list.
    ///
    /// Authorization lists may include actors other than the owner.
    fn is_authorized(&self, anchor: ObjectId, actor: PlayerId) -> bool;

    /// Registered owner of the anchor.
    fn owner_of(&self, anchor: ObjectId) -> Option<PlayerId>;

    /// Current position of a connected actor.
    fn actor_position(&self, actor: PlayerId) -> Option<Position>;

    /// Spawn a map marker entity. The world owns the entity; we only keep
    /// its id.
    fn spawn_marker(&mut self, at: Position, appearance: &MarkerAppearance) -> ObjectId;

    /// Destroy a world entity. Must tolerate ids that no longer resolve.
    fn kill(&mut self, object: ObjectId);

    /// Every marker-type entity currently in the world, including ones this
    /// process has no record of. Used by the startup sweep's coarse cleanup.
    fn marker_ids(&self) -> Vec<ObjectId>;
}
