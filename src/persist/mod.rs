//! Durable state: snapshot format and the data-store contract.
//!
//! Zone and marker records survive restarts; pending removals never do.
//! The document is JSON under a fixed name; a missing document on load is
//! an empty state, not an error. Write mechanics (atomicity, paths) belong
//! to the host's file layer.

use serde::{Deserialize, Serialize};

use crate::core::{ObjectId, PlayerId};
use crate::registry::ZoneRegistry;

/// Name of the persisted document.
pub const DATA_FILE_NAME: &str = "RaidMe";

/// Named-document storage provided by the host.
pub trait DataStore {
    /// Load a document by name, `None` if it doesn't exist.
    fn load(&self, name: &str) -> Option<String>;

    /// Save a document under a name, replacing any previous content.
    fn save(&mut self, name: &str, document: &str);
}

/// One owner's zone: the anchor it surrounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub owner: PlayerId,
    pub anchor: ObjectId,
}

/// One anchor's visual marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub anchor: ObjectId,
    pub marker: ObjectId,
}

/// The serialized form of the whole registry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub zones: Vec<ZoneRecord>,
    pub markers: Vec<MarkerRecord>,
}

/// Serialize the registry and write it to the store.
///
/// Fire-and-forget from the engine's perspective; durability is the host's
/// responsibility.
pub fn save(store: &mut dyn DataStore, registry: &ZoneRegistry) {
    let state = registry.snapshot();
    match serde_json::to_string(&state) {
        Ok(document) => store.save(DATA_FILE_NAME, &document),
        Err(err) => log::warn!("failed to serialize zone data: {err}"),
    }
}

/// Read the persisted document and rebuild a registry from it.
///
/// An absent or unreadable document yields an empty registry.
#[must_use]
pub fn load(store: &dyn DataStore) -> ZoneRegistry {
    let Some(document) = store.load(DATA_FILE_NAME) else {
        return ZoneRegistry::new();
    };
    match serde_json::from_str::<PersistedState>(&document) {
        Ok(state) => ZoneRegistry::restore(&state),
        Err(err) => {
            log::warn!("discarding unreadable zone data: {err}");
            ZoneRegistry::new()
        }
    }
}
