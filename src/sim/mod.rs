//! In-memory reference host for exercising the engine.
//!
//! Implements every collaborator contract over plain maps:
//! - [`SimWorld`]: anchors, markers, actor positions, linear-scan spatial
//!   queries
//! - [`SimZoneService`] / [`SimRuleMapper`]: the optional plugins
//! - [`SimPermissions`]: explicit grant lists
//! - [`MemoryStore`]: named documents in a map
//!
//! [`SimHost`] bundles all of them and hands out an [`Externals`] per
//! operation, with flags to simulate an absent plugin.
//!
//! Used by the integration tests; also a template for wiring a real host.
//!
//! [`Externals`]: crate::services::Externals

mod host;

pub use host::{MemoryStore, SimHost, SimPermissions, SimRuleMapper, SimWorld, SimZoneService};
