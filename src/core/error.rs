//! Rejection taxonomy.
//!
//! Every variant is recovered at the orchestrator boundary and turned into a
//! user-facing notice; none is fatal. The `Display` text is the notice text.
//!
//! Failures of external collaborators are deliberately *not* represented
//! here: an absent zone service or rule mapper degrades to a no-op, never to
//! an error.

use thiserror::Error;

/// Why a command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ZoneError {
    /// The actor lacks the permission grant for the command group.
    #[error("You do not have permission to use this command.")]
    PermissionDenied,

    /// Unrecognized subcommand or wrong argument count.
    #[error("Unknown command. Use /{command} help.")]
    InvalidCommandSyntax {
        /// The command group the usage hint should name.
        command: &'static str,
    },

    /// No qualifying anchor near the actor, or the nearest one isn't theirs.
    #[error("You do not own a TC in this area.")]
    NoOwnedAnchor,

    /// An unauthorized anchor sits inside the exclusion radius.
    #[error("There are other TCs too close to your base that you are not authorized on. You cannot create a PvP zone here.")]
    ForeignAnchorNearby,

    /// The actor already owns a zone.
    #[error("You already have a PvP zone around a TC. Remove it first with /raidme remove.")]
    AlreadyHasZone,

    /// The actor owns no zone.
    #[error("You do not have a PvP zone around a TC.")]
    NoZoneOwned,

    /// Removal was requested from outside the actor's own zone.
    #[error("You are not in the PvP zone. You cannot remove it.")]
    NotInOwnZone,

    /// There is no removal timer to cancel.
    #[error("You do not have a removal timer active.")]
    NoPendingRemoval,

    /// No zone contains the admin's location.
    #[error("No matching zone found for your location.")]
    NoMatchingZoneAtLocation,
}
