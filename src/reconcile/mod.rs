//! Reconciliation sweep.
//!
//! Runs at process start (and is safe to re-run) to heal whatever a crash,
//! restart, or swallowed external failure left behind:
//!
//! 1. coarse cleanup: kill every marker-type entity in the world, recorded
//!    or not, so orphaned visuals from an ungraceful shutdown disappear;
//! 2. purge zone records whose anchor no longer resolves;
//! 3. purge external zone ids that carry our prefix but decode to an owner
//!    we don't know (never ours, or already gone locally), without touching
//!    local state;
//! 4. respawn markers for every surviving record, replacing stale ids.

use log::info;

use crate::core::{naming, ZoneSettings};
use crate::persist;
use crate::registry::ZoneRegistry;
use crate::services::Externals;

/// Diff the registry against the world and the external zone service, and
/// purge orphans in both directions.
pub fn sweep(registry: &mut ZoneRegistry, ext: &mut Externals<'_>, settings: &ZoneSettings) {
    for marker in ext.world.marker_ids() {
        ext.world.kill(marker);
    }

    let mut purged_local = 0;
    for owner in registry.owners() {
        let anchor_alive = registry
            .anchor_for(owner)
            .is_some_and(|anchor| ext.world.contains(anchor));
        if !anchor_alive {
            // Cannot fail: `owner` came out of the registry one line up.
            let _ = registry.remove(ext, owner);
            purged_local += 1;
        }
    }

    let mut purged_external = 0;
    for zone_id in ext.zone_ids() {
        if !zone_id.starts_with(naming::ZONE_ID_PREFIX) {
            continue;
        }
        let known = naming::owner_from_zone_id(&zone_id)
            .is_some_and(|owner| registry.contains_owner(owner));
        if !known {
            ext.erase_zone(&zone_id);
            ext.remove_mapping(&zone_id);
            purged_external += 1;
        }
    }

    registry.refresh_markers(ext, settings);
    persist::save(ext.store, registry);

    info!(
        "reconciliation: purged {purged_local} local and {purged_external} external record(s), {} zone(s) remain",
        registry.len()
    );
}
