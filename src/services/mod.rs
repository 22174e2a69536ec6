//! External collaborator contracts.
//!
//! The zone service ("ZoneManager") and rule mapper ("TruePVE") are host
//! plugins that may not be loaded. [`Externals`] bundles every collaborator
//! handle for one operation and degrades calls on absent collaborators to
//! no-ops: the engine favors availability of its own state over strict
//! external consistency, and the reconciliation sweep heals any drift at the
//! next startup.

use crate::core::PlayerId;
use crate::persist::DataStore;
use crate::world::{Position, World};

/// Permission grant required for the player command group.
pub const PERMISSION_USE: &str = "raidme.use";

/// Permission grant required for the admin command group.
pub const PERMISSION_ADMIN: &str = "raidme.admin";

/// Rule name mapped onto every zone: excludes it from PvE protection.
pub const PVP_RULE: &str = "exclude";

/// Attributes registered with the external zone service.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneAttributes {
    /// Display name of the zone.
    pub name: String,
    /// Text shown to actors entering the zone.
    pub enter_message: String,
    /// Text shown to actors leaving the zone.
    pub leave_message: String,
    /// Zone radius, in world distance units.
    pub radius: f32,
}

/// The external zone registry that enforces the PvP rule set.
pub trait ZoneService {
    /// Create the zone, or update it in place if the id already exists.
    fn create_or_update_zone(&mut self, zone_id: &str, attributes: &ZoneAttributes, center: Position);

    /// Erase the zone. Erasing an unknown id is a no-op.
    fn erase_zone(&mut self, zone_id: &str);

    /// Whether the actor is currently inside the zone.
    fn is_actor_in_zone(&self, zone_id: &str, actor: PlayerId) -> bool;

    /// All zone ids the service currently holds, ours and everyone else's.
    fn zone_ids(&self) -> Vec<String>;
}

/// The external rule-mapping service that toggles PvP exclusion per zone.
pub trait RuleMapper {
    /// Map the zone id to a rule, replacing any existing mapping.
    fn add_or_update_mapping(&mut self, zone_id: &str, rule: &str);

    /// Remove the zone's mapping. Removing an unknown id is a no-op.
    fn remove_mapping(&mut self, zone_id: &str);
}

/// Permission oracle of the host's permission system.
pub trait Permissions {
    /// Whether the actor holds the named grant.
    fn has_permission(&self, actor: PlayerId, grant: &str) -> bool;
}

/// Every external handle one lifecycle operation may touch, passed by
/// reference rather than reached through ambient globals.
///
/// `zones` and `rules` are `Option` because those plugins may be absent;
/// the helper methods below turn calls on absent collaborators into no-ops.
pub struct Externals<'a> {
    pub world: &'a mut dyn World,
    pub zones: Option<&'a mut dyn ZoneService>,
    pub rules: Option<&'a mut dyn RuleMapper>,
    pub perms: &'a dyn Permissions,
    pub store: &'a mut dyn DataStore,
}

impl Externals<'_> {
    /// Create or update the zone, if the zone service is loaded.
    pub fn create_or_update_zone(
        &mut self,
        zone_id: &str,
        attributes: &ZoneAttributes,
        center: Position,
    ) {
        if let Some(zones) = self.zones.as_deref_mut() {
            zones.create_or_update_zone(zone_id, attributes, center);
        }
    }

    /// Erase the zone, if the zone service is loaded.
    pub fn erase_zone(&mut self, zone_id: &str) {
        if let Some(zones) = self.zones.as_deref_mut() {
            zones.erase_zone(zone_id);
        }
    }

    /// Whether the actor is inside the zone. An absent zone service reports
    /// `false`: removal requests are then rejected rather than trusted.
    #[must_use]
    pub fn is_actor_in_zone(&self, zone_id: &str, actor: PlayerId) -> bool {
        self.zones
            .as_deref()
            .is_some_and(|zones| zones.is_actor_in_zone(zone_id, actor))
    }

    /// Zone ids held by the zone service; empty when it is absent.
    #[must_use]
    pub fn zone_ids(&self) -> Vec<String> {
        self.zones
            .as_deref()
            .map(ZoneService::zone_ids)
            .unwrap_or_default()
    }

    /// Map the zone id to a rule, if the rule mapper is loaded.
    pub fn add_or_update_mapping(&mut self, zone_id: &str, rule: &str) {
        if let Some(rules) = self.rules.as_deref_mut() {
            rules.add_or_update_mapping(zone_id, rule);
        }
    }

    /// Remove the zone's rule mapping, if the rule mapper is loaded.
    pub fn remove_mapping(&mut self, zone_id: &str) {
        if let Some(rules) = self.rules.as_deref_mut() {
            rules.remove_mapping(zone_id);
        }
    }
}
