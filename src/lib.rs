//! # raidme
//!
//! Lifecycle engine for ephemeral player-owned PvP zones: an actor creates
//! a zone around an anchor object they own, contests keep it alive (an
//! attack cancels any pending removal), teardown is delayed and cancellable,
//! and a startup sweep heals whatever crashes left behind.
//!
//! ## Design Principles
//!
//! 1. **Host-agnostic**: the game world, the external zone service, the
//!    rule mapper, permissions, and storage are all traits. The engine only
//!    sequences them.
//!
//! 2. **Single-loop concurrency**: every operation runs on the host's one
//!    event loop. No locks; cancellation and timer fire are totally ordered
//!    by the loop, so the classic cancel-vs-fire race cannot occur.
//!
//! 3. **Availability over external consistency**: calls to absent
//!    collaborators are no-ops, never errors. Drift is healed by the
//!    reconciliation sweep at next startup.
//!
//! 4. **Weak references into the world**: records hold ids, not handles.
//!    "Not found" is a normal lifecycle outcome everywhere.
//!
//! ## Modules
//!
//! - `core`: ids, zone-id naming, settings, error taxonomy
//! - `world`: geometry and the world/spatial-index/entity-factory contract
//! - `services`: external collaborator contracts and the `Externals` bundle
//! - `registry`: owner -> anchor and anchor -> marker maps (all mutation)
//! - `scheduler`: per-owner delayed removal with cancellation
//! - `eligibility`: may this actor create a zone here?
//! - `lifecycle`: the command/event orchestrator
//! - `reconcile`: the startup sweep
//! - `persist`: snapshot format and the data-store contract
//! - `sim`: in-memory reference host used by the tests

pub mod core;
pub mod eligibility;
pub mod lifecycle;
pub mod persist;
pub mod reconcile;
pub mod registry;
pub mod scheduler;
pub mod services;
pub mod sim;
pub mod world;

// Re-export commonly used types
pub use crate::core::{clamp_radius, naming, ObjectId, PlayerId, ZoneError, ZoneSettings};

pub use crate::eligibility::{check_eligibility, ANCHOR_SEARCH_RADIUS};

pub use crate::lifecycle::{
    AdminCommand, Notice, PlayerCommand, WorldEvent, ZoneLifecycle, ADMIN_COMMAND, PLAYER_COMMAND,
};

pub use crate::persist::{DataStore, MarkerRecord, PersistedState, ZoneRecord, DATA_FILE_NAME};

pub use crate::registry::ZoneRegistry;

pub use crate::scheduler::RemovalScheduler;

pub use crate::services::{
    Externals, Permissions, RuleMapper, ZoneAttributes, ZoneService, PERMISSION_ADMIN,
    PERMISSION_USE, PVP_RULE,
};

pub use crate::world::{MarkerAppearance, Position, World};
