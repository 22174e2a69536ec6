//! Reference host implementation.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::core::{ObjectId, PlayerId};
use crate::persist::DataStore;
use crate::services::{Externals, Permissions, RuleMapper, ZoneAttributes, ZoneService};
use crate::world::{MarkerAppearance, Position, World};

#[derive(Clone, Debug)]
struct SimAnchor {
    position: Position,
    owner: PlayerId,
    authorized: Vec<PlayerId>,
}

#[derive(Clone, Debug)]
struct SimMarker {
    position: Position,
    appearance: MarkerAppearance,
}

/// Map-backed world: anchors, markers, actor positions.
#[derive(Clone, Debug)]
pub struct SimWorld {
    next_id: u64,
    anchors: FxHashMap<ObjectId, SimAnchor>,
    markers: FxHashMap<ObjectId, SimMarker>,
    actors: FxHashMap<PlayerId, Position>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self {
            next_id: 1,
            anchors: FxHashMap::default(),
            markers: FxHashMap::default(),
            actors: FxHashMap::default(),
        }
    }
}

impl SimWorld {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Put an actor at a position (connecting or teleporting them).
    pub fn place_actor(&mut self, actor: PlayerId, at: Position) {
        self.actors.insert(actor, at);
    }

    /// Add an anchor owned by `owner`, authorized for its owner only.
    pub fn add_anchor(&mut self, owner: PlayerId, at: Position) -> ObjectId {
        let id = self.alloc();
        self.anchors.insert(
            id,
            SimAnchor {
                position: at,
                owner,
                authorized: vec![owner],
            },
        );
        id
    }

    /// Add `actor` to an anchor's authorization list.
    pub fn authorize(&mut self, anchor: ObjectId, actor: PlayerId) {
        if let Some(entry) = self.anchors.get_mut(&anchor) {
            if !entry.authorized.contains(&actor) {
                entry.authorized.push(actor);
            }
        }
    }

    /// Spawn a marker with no record anywhere, as an ungraceful shutdown
    /// would leave behind.
    pub fn add_orphan_marker(&mut self, at: Position) -> ObjectId {
        self.spawn_marker(
            at,
            &MarkerAppearance {
                color: "#FF0000".to_string(),
                alpha: 0.4,
                radius: 0.75,
            },
        )
    }

    /// Remove an entity from the world, as the simulation would on death.
    pub fn destroy(&mut self, object: ObjectId) {
        self.anchors.remove(&object);
        self.markers.remove(&object);
    }

    /// Number of live marker entities.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Appearance of a live marker.
    #[must_use]
    pub fn marker_appearance(&self, marker: ObjectId) -> Option<&MarkerAppearance> {
        self.markers.get(&marker).map(|m| &m.appearance)
    }
}

impl World for SimWorld {
    fn anchors_near(&self, center: Position, radius: f32) -> SmallVec<[ObjectId; 8]> {
        let mut hits: SmallVec<[ObjectId; 8]> = self
            .anchors
            .iter()
            .filter(|(_, anchor)| anchor.position.distance(center) <= radius)
            .map(|(&id, _)| id)
            .collect();
        hits.sort_unstable();
        hits
    }

    fn contains(&self, object: ObjectId) -> bool {
        self.anchors.contains_key(&object) || self.markers.contains_key(&object)
    }

    fn position(&self, object: ObjectId) -> Option<Position> {
        self.anchors
            .get(&object)
            .map(|a| a.position)
            .or_else(|| self.markers.get(&object).map(|m| m.position))
    }

    fn is_authorized(&self, anchor: ObjectId, actor: PlayerId) -> bool {
        self.anchors
            .get(&anchor)
            .is_some_and(|a| a.authorized.contains(&actor))
    }

    fn owner_of(&self, anchor: ObjectId) -> Option<PlayerId> {
        self.anchors.get(&anchor).map(|a| a.owner)
    }

    fn actor_position(&self, actor: PlayerId) -> Option<Position> {
        self.actors.get(&actor).copied()
    }

    fn spawn_marker(&mut self, at: Position, appearance: &MarkerAppearance) -> ObjectId {
        let id = self.alloc();
        self.markers.insert(
            id,
            SimMarker {
                position: at,
                appearance: appearance.clone(),
            },
        );
        id
    }

    fn kill(&mut self, object: ObjectId) {
        self.destroy(object);
    }

    fn marker_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.markers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[derive(Clone, Debug)]
struct SimZone {
    attributes: ZoneAttributes,
    center: Position,
}

/// Map-backed zone service with explicit occupancy flags.
#[derive(Clone, Debug, Default)]
pub struct SimZoneService {
    zones: FxHashMap<String, SimZone>,
    inside: FxHashSet<(String, PlayerId)>,
    erase_calls: FxHashMap<String, usize>,
}

impl SimZoneService {
    /// Create an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the service holds a zone with this id.
    #[must_use]
    pub fn has_zone(&self, zone_id: &str) -> bool {
        self.zones.contains_key(zone_id)
    }

    /// Attributes registered for a zone.
    #[must_use]
    pub fn attributes(&self, zone_id: &str) -> Option<&ZoneAttributes> {
        self.zones.get(zone_id).map(|z| &z.attributes)
    }

    /// Center registered for a zone.
    #[must_use]
    pub fn center(&self, zone_id: &str) -> Option<Position> {
        self.zones.get(zone_id).map(|z| z.center)
    }

    /// Mark an actor inside or outside a zone. The sim has no movement; the
    /// test decides occupancy.
    pub fn set_inside(&mut self, zone_id: &str, actor: PlayerId, inside: bool) {
        let key = (zone_id.to_string(), actor);
        if inside {
            self.inside.insert(key);
        } else {
            self.inside.remove(&key);
        }
    }

    /// How many erase calls the service has seen for a zone id.
    #[must_use]
    pub fn erase_count(&self, zone_id: &str) -> usize {
        self.erase_calls.get(zone_id).copied().unwrap_or(0)
    }
}

impl ZoneService for SimZoneService {
    fn create_or_update_zone(
        &mut self,
        zone_id: &str,
        attributes: &ZoneAttributes,
        center: Position,
    ) {
        self.zones.insert(
            zone_id.to_string(),
            SimZone {
                attributes: attributes.clone(),
                center,
            },
        );
    }

    fn erase_zone(&mut self, zone_id: &str) {
        *self.erase_calls.entry(zone_id.to_string()).or_insert(0) += 1;
        self.zones.remove(zone_id);
        self.inside.retain(|(zone, _)| zone != zone_id);
    }

    fn is_actor_in_zone(&self, zone_id: &str, actor: PlayerId) -> bool {
        self.inside.contains(&(zone_id.to_string(), actor))
    }

    fn zone_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.zones.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

/// Map-backed rule mapper.
#[derive(Clone, Debug, Default)]
pub struct SimRuleMapper {
    mappings: FxHashMap<String, String>,
}

impl SimRuleMapper {
    /// Create an empty mapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule mapped for a zone id.
    #[must_use]
    pub fn rule_for(&self, zone_id: &str) -> Option<String> {
        self.mappings.get(zone_id).cloned()
    }
}

impl RuleMapper for SimRuleMapper {
    fn add_or_update_mapping(&mut self, zone_id: &str, rule: &str) {
        self.mappings.insert(zone_id.to_string(), rule.to_string());
    }

    fn remove_mapping(&mut self, zone_id: &str) {
        self.mappings.remove(zone_id);
    }
}

/// Grant-list permissions.
#[derive(Clone, Debug, Default)]
pub struct SimPermissions {
    grants: FxHashSet<(PlayerId, String)>,
}

impl SimPermissions {
    /// Create an empty permission table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give an actor a grant.
    pub fn grant(&mut self, actor: PlayerId, grant: &str) {
        self.grants.insert((actor, grant.to_string()));
    }

    /// Take a grant away.
    pub fn revoke(&mut self, actor: PlayerId, grant: &str) {
        self.grants.remove(&(actor, grant.to_string()));
    }
}

impl Permissions for SimPermissions {
    fn has_permission(&self, actor: PlayerId, grant: &str) -> bool {
        self.grants.contains(&(actor, grant.to_string()))
    }
}

/// Named documents in a map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

impl DataStore for MemoryStore {
    fn load(&self, name: &str) -> Option<String> {
        self.documents.get(name).cloned()
    }

    fn save(&mut self, name: &str, document: &str) {
        self.documents.insert(name.to_string(), document.to_string());
    }
}

/// All reference collaborators in one place.
///
/// `zones_loaded` / `rules_loaded` simulate the corresponding plugin being
/// absent: when false, [`SimHost::externals`] hands out `None` and the
/// engine's calls to that collaborator become no-ops.
#[derive(Clone, Debug)]
pub struct SimHost {
    pub world: SimWorld,
    pub zones: SimZoneService,
    pub rules: SimRuleMapper,
    pub perms: SimPermissions,
    pub store: MemoryStore,
    pub zones_loaded: bool,
    pub rules_loaded: bool,
}

impl Default for SimHost {
    fn default() -> Self {
        Self {
            world: SimWorld::new(),
            zones: SimZoneService::new(),
            rules: SimRuleMapper::new(),
            perms: SimPermissions::new(),
            store: MemoryStore::new(),
            zones_loaded: true,
            rules_loaded: true,
        }
    }
}

impl SimHost {
    /// Create a host with every collaborator loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the collaborator bundle for one engine operation.
    pub fn externals(&mut self) -> Externals<'_> {
        let zones: Option<&mut dyn ZoneService> = if self.zones_loaded {
            Some(&mut self.zones)
        } else {
            None
        };
        let rules: Option<&mut dyn RuleMapper> = if self.rules_loaded {
            Some(&mut self.rules)
        } else {
            None
        };
        Externals {
            world: &mut self.world,
            zones,
            rules,
            perms: &self.perms,
            store: &mut self.store,
        }
    }
}
