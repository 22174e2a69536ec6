//! Core types: identities, zone-id naming, settings, and the error taxonomy.

pub mod error;
pub mod ids;
pub mod naming;
pub mod settings;

pub use error::ZoneError;
pub use ids::{ObjectId, PlayerId};
pub use settings::{clamp_radius, ZoneSettings};
