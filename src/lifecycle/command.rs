//! Chat command surface.
//!
//! Two command groups, each behind its own permission grant. Parsing is
//! pure: unrecognized subcommands and wrong argument counts become
//! [`ZoneError::InvalidCommandSyntax`] and change no state.

use crate::core::ZoneError;

/// Name of the player command group (`/raidme ...`).
pub const PLAYER_COMMAND: &str = "raidme";

/// Name of the admin command group (`/raidmeadmin ...`).
pub const ADMIN_COMMAND: &str = "raidmeadmin";

/// Subcommands available to regular actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Create a zone around an owned anchor.
    Start,
    /// Schedule removal of the actor's zone.
    Remove,
    /// Cancel a scheduled removal.
    Cancel,
    /// Show the help screen.
    Help,
}

impl PlayerCommand {
    /// Parse the argument list of a `/raidme` invocation.
    pub fn parse(args: &[&str]) -> Result<Self, ZoneError> {
        let syntax = || ZoneError::InvalidCommandSyntax {
            command: PLAYER_COMMAND,
        };
        if args.len() != 1 {
            return Err(syntax());
        }
        match args[0].to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "remove" => Ok(Self::Remove),
            "cancel" => Ok(Self::Cancel),
            "help" => Ok(Self::Help),
            _ => Err(syntax()),
        }
    }
}

/// Subcommands available to admins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminCommand {
    /// List every zone owner.
    List,
    /// Remove the zone the admin is standing in.
    Remove,
    /// Remove every zone.
    Wipe,
    /// Show the help screen.
    Help,
}

impl AdminCommand {
    /// Parse the argument list of a `/raidmeadmin` invocation.
    pub fn parse(args: &[&str]) -> Result<Self, ZoneError> {
        let syntax = || ZoneError::InvalidCommandSyntax {
            command: ADMIN_COMMAND,
        };
        if args.len() != 1 {
            return Err(syntax());
        }
        match args[0].to_ascii_lowercase().as_str() {
            "list" => Ok(Self::List),
            "remove" => Ok(Self::Remove),
            "wipe" => Ok(Self::Wipe),
            "help" => Ok(Self::Help),
            _ => Err(syntax()),
        }
    }
}
