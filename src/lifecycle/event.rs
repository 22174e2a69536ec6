//! World events the orchestrator reacts to.
//!
//! The host translates its callbacks into one tagged union and feeds them
//! through [`crate::ZoneLifecycle::handle_event`] on its single event loop.
//! No handler blocks; ordering within a tick is whatever order the host
//! delivers.

use crate::core::{ObjectId, PlayerId};

/// A host callback, as one event kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// An actor performed a combat action. `victim` is present when the
    /// target was another player.
    PlayerAttacked {
        attacker: PlayerId,
        victim: Option<PlayerId>,
    },

    /// An actor crossed a zone boundary outward.
    ZoneExited { zone_id: String, player: PlayerId },

    /// A world entity was destroyed.
    EntityDestroyed { entity: ObjectId },

    /// The host is writing its periodic persistence checkpoint.
    SaveCheckpoint,

    /// The process is shutting down.
    Shutdown,
}
