//! Zone registry: the authoritative owner → anchor and anchor → marker maps.
//!
//! All mutation of zone existence funnels through this type. Each operation
//! leaves the registry internally consistent and persists before returning;
//! external calls that fail or hit an absent collaborator are swallowed, so
//! local state can briefly drift ahead of the external zone service until
//! the next reconciliation sweep.
//!
//! Invariants:
//! - at most one zone record per owner;
//! - a marker record exists only for anchors that have a zone record
//!   (tolerating brief asynchrony during creation and reconciliation).

use rustc_hash::FxHashMap;

use crate::core::{naming, ObjectId, PlayerId, ZoneError, ZoneSettings};
use crate::persist::{self, MarkerRecord, PersistedState, ZoneRecord};
use crate::services::{Externals, ZoneAttributes, PVP_RULE};

/// Enter notice registered with the external zone service.
const ENTER_MESSAGE: &str = "You have entered a PvP zone.";

/// Leave notice registered with the external zone service.
const LEAVE_MESSAGE: &str = "You have left the PvP zone.";

/// In-process mapping from owners to anchors and anchors to markers.
#[derive(Clone, Debug, Default)]
pub struct ZoneRegistry {
    /// owner -> anchor the zone surrounds.
    zones: FxHashMap<PlayerId, ObjectId>,

    /// anchor -> marker entity shown on the map.
    markers: FxHashMap<ObjectId, ObjectId>,
}

impl ZoneRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zones exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Whether the owner has an active zone.
    #[must_use]
    pub fn contains_owner(&self, owner: PlayerId) -> bool {
        self.zones.contains_key(&owner)
    }

    /// Anchor of the owner's zone.
    #[must_use]
    pub fn anchor_for(&self, owner: PlayerId) -> Option<ObjectId> {
        self.zones.get(&owner).copied()
    }

    /// Owner whose zone surrounds the given anchor.
    #[must_use]
    pub fn owner_of_anchor(&self, anchor: ObjectId) -> Option<PlayerId> {
        self.zones
            .iter()
            .find(|(_, &a)| a == anchor)
            .map(|(&owner, _)| owner)
    }

    /// Marker entity recorded for the anchor.
    #[must_use]
    pub fn marker_for(&self, anchor: ObjectId) -> Option<ObjectId> {
        self.markers.get(&anchor).copied()
    }

    /// All zone owners, ascending. The fixed order makes iteration-dependent
    /// operations (admin remove, wipe, sweeps) deterministic.
    #[must_use]
    pub fn owners(&self) -> Vec<PlayerId> {
        let mut owners: Vec<PlayerId> = self.zones.keys().copied().collect();
        owners.sort_unstable();
        owners
    }

    /// All recorded marker entity ids.
    #[must_use]
    pub fn marker_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.markers.values().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Insert a zone record directly, without external calls.
    ///
    /// Used by [`ZoneRegistry::restore`] and tests; command paths go through
    /// [`ZoneRegistry::create`].
    pub fn insert_zone(&mut self, owner: PlayerId, anchor: ObjectId) {
        self.zones.insert(owner, anchor);
    }

    /// Insert a marker record directly, without spawning an entity.
    pub fn insert_marker(&mut self, anchor: ObjectId, marker: ObjectId) {
        self.markers.insert(anchor, marker);
    }

    /// Create a zone for `owner` around `anchor`.
    ///
    /// The caller is responsible for eligibility, including the
    /// one-zone-per-owner rule. Registers the zone and its PvP rule mapping
    /// externally, spawns the map marker, and persists.
    pub fn create(
        &mut self,
        ext: &mut Externals<'_>,
        settings: &ZoneSettings,
        owner: PlayerId,
        anchor: ObjectId,
    ) {
        let zone_id = naming::zone_id_for(owner);

        if let Some(center) = ext.world.position(anchor) {
            let attributes = ZoneAttributes {
                name: naming::zone_display_name(owner),
                enter_message: ENTER_MESSAGE.to_string(),
                leave_message: LEAVE_MESSAGE.to_string(),
                radius: settings.zone_radius().round(),
            };
            ext.create_or_update_zone(&zone_id, &attributes, center);
            ext.add_or_update_mapping(&zone_id, PVP_RULE);
        }

        self.zones.insert(owner, anchor);
        self.create_marker(ext, settings, anchor);
        persist::save(ext.store, self);
    }

    /// Remove the owner's zone: erase it externally, drop the rule mapping,
    /// destroy the marker, delete both records, persist.
    ///
    /// Reports [`ZoneError::NoZoneOwned`] when there is nothing to remove,
    /// touching no state and issuing no external calls.
    pub fn remove(&mut self, ext: &mut Externals<'_>, owner: PlayerId) -> Result<(), ZoneError> {
        let Some(anchor) = self.zones.remove(&owner) else {
            return Err(ZoneError::NoZoneOwned);
        };

        let zone_id = naming::zone_id_for(owner);
        ext.erase_zone(&zone_id);
        ext.remove_mapping(&zone_id);

        if let Some(marker) = self.markers.remove(&anchor) {
            ext.world.kill(marker);
        }

        persist::save(ext.store, self);
        Ok(())
    }

    /// Remove every zone. Returns how many were removed.
    pub fn wipe_all(&mut self, ext: &mut Externals<'_>) -> usize {
        let owners = self.owners();
        for owner in &owners {
            // Present by construction; the error arm is unreachable.
            let _ = self.remove(ext, *owner);
        }
        owners.len()
    }

    /// Spawn a map marker at the anchor's position and record it, replacing
    /// (and destroying) any stale marker recorded for the same anchor.
    ///
    /// A no-op when the anchor no longer resolves.
    pub fn create_marker(
        &mut self,
        ext: &mut Externals<'_>,
        settings: &ZoneSettings,
        anchor: ObjectId,
    ) {
        let Some(at) = ext.world.position(anchor) else {
            return;
        };
        let marker = ext.world.spawn_marker(at, &settings.marker_appearance());
        if let Some(stale) = self.markers.insert(anchor, marker) {
            ext.world.kill(stale);
        }
    }

    /// Drop marker records whose anchor no longer has a zone, then respawn a
    /// marker for every zone anchor. Used by the reconciliation sweep after
    /// its coarse marker purge.
    pub fn refresh_markers(&mut self, ext: &mut Externals<'_>, settings: &ZoneSettings) {
        let live: Vec<ObjectId> = self.zones.values().copied().collect();
        self.markers.retain(|anchor, _| live.contains(anchor));

        let mut anchors = live;
        anchors.sort_unstable();
        for anchor in anchors {
            self.create_marker(ext, settings, anchor);
        }
    }

    /// Serializable snapshot of all records, in deterministic order.
    #[must_use]
    pub fn snapshot(&self) -> PersistedState {
        let mut zones: Vec<ZoneRecord> = self
            .zones
            .iter()
            .map(|(&owner, &anchor)| ZoneRecord { owner, anchor })
            .collect();
        zones.sort_unstable_by_key(|record| record.owner);

        let mut markers: Vec<MarkerRecord> = self
            .markers
            .iter()
            .map(|(&anchor, &marker)| MarkerRecord { anchor, marker })
            .collect();
        markers.sort_unstable_by_key(|record| record.anchor);

        PersistedState { zones, markers }
    }

    /// Rebuild a registry from a snapshot.
    #[must_use]
    pub fn restore(state: &PersistedState) -> Self {
        let mut registry = Self::new();
        for record in &state.zones {
            registry.zones.insert(record.owner, record.anchor);
        }
        for record in &state.markers {
            registry.markers.insert(record.anchor, record.marker);
        }
        registry
    }
}
