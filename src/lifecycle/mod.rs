//! Lifecycle orchestrator.
//!
//! Sequences checker -> registry -> external registration -> scheduler, and
//! reacts to world events by driving the same three. Every rejection from
//! the taxonomy is recovered here and turned into a [`Notice`]; nothing
//! below this boundary reaches the user or kills the process.
//!
//! One instance per running system. The host constructs it at startup,
//! feeds it commands, events, and clock ticks from its single event loop,
//! and tears it down with [`WorldEvent::Shutdown`]. Because everything runs
//! on that one loop, a cancellation processed earlier in a tick always
//! beats a timer fire processed later; there is no race to lose.

pub mod command;
pub mod event;

use log::{debug, info};

use crate::core::{naming, PlayerId, ZoneError, ZoneSettings};
use crate::eligibility::check_eligibility;
use crate::persist;
use crate::reconcile;
use crate::registry::ZoneRegistry;
use crate::scheduler::RemovalScheduler;
use crate::services::{Externals, PERMISSION_ADMIN, PERMISSION_USE};

pub use command::{AdminCommand, PlayerCommand, ADMIN_COMMAND, PLAYER_COMMAND};
pub use event::WorldEvent;

/// A user-facing message produced by an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// The actor to deliver the message to.
    pub to: PlayerId,
    /// The message text.
    pub text: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(to: PlayerId, text: impl Into<String>) -> Self {
        Self {
            to,
            text: text.into(),
        }
    }
}

/// The one registry/scheduler pair of a running system.
#[derive(Clone, Debug)]
pub struct ZoneLifecycle {
    settings: ZoneSettings,
    registry: ZoneRegistry,
    scheduler: RemovalScheduler,
}

impl ZoneLifecycle {
    /// Create a lifecycle with an empty registry.
    #[must_use]
    pub fn new(settings: ZoneSettings) -> Self {
        Self {
            settings,
            registry: ZoneRegistry::new(),
            scheduler: RemovalScheduler::new(),
        }
    }

    /// Load persisted state and reconcile it against the world and the
    /// external zone service. Run once at process start; safe to re-run.
    pub fn start(&mut self, ext: &mut Externals<'_>) {
        self.registry = persist::load(ext.store);
        reconcile::sweep(&mut self.registry, ext, &self.settings);
        info!("initialization complete, {} zone(s) active", self.registry.len());
    }

    /// The settings this lifecycle runs under.
    #[must_use]
    pub fn settings(&self) -> &ZoneSettings {
        &self.settings
    }

    /// The zone registry (read-only; mutation funnels through commands and
    /// events).
    #[must_use]
    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    /// The removal scheduler (read-only).
    #[must_use]
    pub fn scheduler(&self) -> &RemovalScheduler {
        &self.scheduler
    }

    // === Command surface ===

    /// Handle a `/raidme` invocation. `now` is the host loop's clock in
    /// seconds, used to arm removal timers.
    pub fn player_command(
        &mut self,
        ext: &mut Externals<'_>,
        actor: PlayerId,
        args: &[&str],
        now: f64,
    ) -> Vec<Notice> {
        if !ext.perms.has_permission(actor, PERMISSION_USE) {
            return vec![Notice::new(actor, ZoneError::PermissionDenied.to_string())];
        }

        let result = match PlayerCommand::parse(args) {
            Ok(PlayerCommand::Start) => self.create_zone(ext, actor),
            Ok(PlayerCommand::Remove) => self.request_removal(ext, actor, now),
            Ok(PlayerCommand::Cancel) => self.cancel_removal(actor),
            Ok(PlayerCommand::Help) => Ok(vec![Notice::new(actor, self.player_help())]),
            Err(err) => Err(err),
        };
        result.unwrap_or_else(|err| vec![Notice::new(actor, err.to_string())])
    }

    /// Handle a `/raidmeadmin` invocation.
    pub fn admin_command(
        &mut self,
        ext: &mut Externals<'_>,
        admin: PlayerId,
        args: &[&str],
    ) -> Vec<Notice> {
        if !ext.perms.has_permission(admin, PERMISSION_ADMIN) {
            return vec![Notice::new(admin, ZoneError::PermissionDenied.to_string())];
        }

        let result = match AdminCommand::parse(args) {
            Ok(AdminCommand::List) => Ok(vec![Notice::new(admin, self.list_zones())]),
            Ok(AdminCommand::Remove) => self.admin_remove(ext, admin),
            Ok(AdminCommand::Wipe) => self.wipe(ext, admin),
            Ok(AdminCommand::Help) => Ok(vec![Notice::new(admin, self.admin_help())]),
            Err(err) => Err(err),
        };
        result.unwrap_or_else(|err| vec![Notice::new(admin, err.to_string())])
    }

    /// Fire any removal timers due at `now`. Call from the host loop.
    pub fn tick(&mut self, ext: &mut Externals<'_>, now: f64) -> Vec<Notice> {
        let mut notices = Vec::new();
        for owner in self.scheduler.fire_due(now) {
            match self.registry.remove(ext, owner) {
                Ok(()) => notices.push(Notice::new(owner, "PvP zone removed.")),
                // The zone disappeared while the timer was pending.
                Err(_) => debug!("removal timer fired for {owner} with no zone"),
            }
        }
        notices
    }

    // === World events ===

    /// React to a host callback.
    pub fn handle_event(&mut self, ext: &mut Externals<'_>, event: WorldEvent) -> Vec<Notice> {
        match event {
            WorldEvent::PlayerAttacked { attacker, victim } => {
                if self.scheduler.cancel(attacker) {
                    return vec![Notice::new(
                        attacker,
                        "You attacked something. The removal timer has been cancelled.",
                    )];
                }
                if let Some(victim) = victim {
                    if self.scheduler.cancel(victim) {
                        return vec![Notice::new(
                            victim,
                            "You were attacked by a player. The removal timer has been cancelled.",
                        )];
                    }
                }
                Vec::new()
            }

            WorldEvent::ZoneExited { zone_id, player } => {
                // Only leaving their own zone interrupts a pending removal.
                if zone_id == naming::zone_id_for(player) && self.scheduler.cancel(player) {
                    return vec![Notice::new(
                        player,
                        "You left your PvP zone. The removal timer has been cancelled.",
                    )];
                }
                Vec::new()
            }

            WorldEvent::EntityDestroyed { entity } => {
                if let Some(owner) = self.registry.owner_of_anchor(entity) {
                    let _ = self.remove_zone(ext, owner);
                    info!("anchor {entity} destroyed, removed zone of {owner}");
                }
                Vec::new()
            }

            WorldEvent::SaveCheckpoint => {
                persist::save(ext.store, &self.registry);
                Vec::new()
            }

            WorldEvent::Shutdown => {
                self.scheduler.cancel_all();
                for marker in self.registry.marker_ids() {
                    ext.world.kill(marker);
                }
                persist::save(ext.store, &self.registry);
                info!("shut down, state persisted");
                Vec::new()
            }
        }
    }

    // === Operations ===

    /// Remove a zone and any pending removal for its owner.
    ///
    /// The internal funnel used by admin removal, wipe, and anchor
    /// destruction, keeping timers and records in step.
    fn remove_zone(&mut self, ext: &mut Externals<'_>, owner: PlayerId) -> Result<(), ZoneError> {
        self.scheduler.cancel(owner);
        self.registry.remove(ext, owner)
    }

    fn create_zone(
        &mut self,
        ext: &mut Externals<'_>,
        actor: PlayerId,
    ) -> Result<Vec<Notice>, ZoneError> {
        let anchor = match check_eligibility(ext.world, &self.registry, &self.settings, actor) {
            Ok(anchor) => anchor,
            Err(err) => {
                if err == ZoneError::NoOwnedAnchor {
                    info!("player {actor} tried to create a zone but no valid anchor was found");
                }
                return Err(err);
            }
        };

        self.registry.create(ext, &self.settings, actor, anchor);
        Ok(vec![Notice::new(actor, "PvP zone created around your TC.")])
    }

    fn request_removal(
        &mut self,
        ext: &mut Externals<'_>,
        actor: PlayerId,
        now: f64,
    ) -> Result<Vec<Notice>, ZoneError> {
        if !self.registry.contains_owner(actor) {
            return Err(ZoneError::NoZoneOwned);
        }
        if !ext.is_actor_in_zone(&naming::zone_id_for(actor), actor) {
            return Err(ZoneError::NotInOwnZone);
        }

        let delay = self.settings.removal_delay_seconds;
        self.scheduler.schedule(actor, now, delay);
        Ok(vec![Notice::new(
            actor,
            format!("PvP zone will be removed from your TC after {delay} seconds."),
        )])
    }

    fn cancel_removal(&mut self, actor: PlayerId) -> Result<Vec<Notice>, ZoneError> {
        if !self.scheduler.cancel(actor) {
            return Err(ZoneError::NoPendingRemoval);
        }
        Ok(vec![Notice::new(actor, "Removal timer cancelled.")])
    }

    fn admin_remove(
        &mut self,
        ext: &mut Externals<'_>,
        admin: PlayerId,
    ) -> Result<Vec<Notice>, ZoneError> {
        // Ascending owner id: deterministic when the admin stands in two
        // overlapping zones.
        for owner in self.registry.owners() {
            if !ext.is_actor_in_zone(&naming::zone_id_for(owner), admin) {
                continue;
            }
            info!("admin {admin} removing zone of {owner}");
            let _ = self.remove_zone(ext, owner);
            return Ok(vec![Notice::new(admin, "PvP zone removed.")]);
        }
        info!("admin {admin} requested removal but stands in no zone");
        Err(ZoneError::NoMatchingZoneAtLocation)
    }

    fn wipe(
        &mut self,
        ext: &mut Externals<'_>,
        admin: PlayerId,
    ) -> Result<Vec<Notice>, ZoneError> {
        for owner in self.registry.owners() {
            self.scheduler.cancel(owner);
        }
        let removed = self.registry.wipe_all(ext);
        info!("admin {admin} wiped {removed} zone(s)");
        Ok(vec![Notice::new(admin, "All PvP zones removed.")])
    }

    fn list_zones(&self) -> String {
        let owners: Vec<String> = self
            .registry
            .owners()
            .iter()
            .map(PlayerId::to_string)
            .collect();
        format!("List of PvP zones:\n {}", owners.join(", "))
    }

    fn player_help(&self) -> String {
        format!(
            "List of available commands:\n\
             /raidme start - Create a PvP zone around a Tool Cupboard (TC) you own.\n\
             /raidme remove - Schedule the removal of the PvP zone around your TC after {} seconds.\n\
             /raidme cancel - Cancel the scheduled removal of the PvP zone around your TC.\n\
             /raidme help - Display this help message.",
            self.settings.removal_delay_seconds
        )
    }

    fn admin_help(&self) -> String {
        "List of available commands:\n\
         /raidmeadmin list - List all PvP zones.\n\
         /raidmeadmin remove - Remove the PvP zone in which you are standing.\n\
         /raidmeadmin wipe - Remove all PvP zones.\n\
         /raidmeadmin help - Display this help message."
            .to_string()
    }
}
