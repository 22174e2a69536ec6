//! Zone-id naming scheme.
//!
//! The external zone service knows our zones only by a string id, and the
//! reconciliation sweep recovers ownership from those ids. The encoding is a
//! fixed prefix followed by the decimal owner id: `RaidMe_{owner}`. The
//! prefix is an interoperability contract with existing deployments; the
//! encode/decode pair below is the only place that knows the scheme.

use super::ids::PlayerId;

/// Prefix correlating this system's records with the external zone service.
pub const ZONE_ID_PREFIX: &str = "RaidMe_";

/// Encode the external zone id for an owner.
///
/// ```
/// use raidme::{naming, PlayerId};
///
/// let owner = PlayerId::new(76561198000000001);
/// let zone_id = naming::zone_id_for(owner);
/// assert_eq!(zone_id, "RaidMe_76561198000000001");
/// assert_eq!(naming::owner_from_zone_id(&zone_id), Some(owner));
/// ```
#[must_use]
pub fn zone_id_for(owner: PlayerId) -> String {
    format!("{}{}", ZONE_ID_PREFIX, owner.raw())
}

/// Decode the owner from an external zone id.
///
/// Returns `None` for ids that don't carry the prefix or whose owner part
/// doesn't parse: those belong to someone else or to a corrupt record.
#[must_use]
pub fn owner_from_zone_id(zone_id: &str) -> Option<PlayerId> {
    zone_id
        .strip_prefix(ZONE_ID_PREFIX)?
        .parse()
        .ok()
        .map(PlayerId::new)
}

/// Display name registered with the external zone service.
#[must_use]
pub fn zone_display_name(owner: PlayerId) -> String {
    format!("RaidMeZone_{}", owner.raw())
}
