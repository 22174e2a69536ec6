//! Removal timer scheduler.
//!
//! Defers zone teardown and exposes cancellation; "attack cancels removal"
//! is built on it. Per owner the state machine is
//! `NoPending -> Pending -> (Cancelled | Fired) -> NoPending`, and
//! re-scheduling while pending restarts the clock instead of stacking a
//! second timer.
//!
//! The host drives time: it calls [`RemovalScheduler::fire_due`] from its
//! single event loop, so a cancellation processed earlier in the same tick
//! always wins over a fire processed later. There is no racing thread.
//!
//! Pending removals are volatile and never persisted.

use rustc_hash::FxHashMap;

use crate::core::PlayerId;

/// Per-owner one-shot deadlines, keyed by host-loop time in seconds.
///
/// ## Usage
///
/// ```
/// use raidme::{PlayerId, RemovalScheduler};
///
/// let mut scheduler = RemovalScheduler::new();
/// let owner = PlayerId::new(1);
///
/// scheduler.schedule(owner, 0.0, 180.0);
/// assert!(scheduler.fire_due(100.0).is_empty());
///
/// // An attack at t=100 cancels the pending removal.
/// assert!(scheduler.cancel(owner));
/// assert!(scheduler.fire_due(180.0).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RemovalScheduler {
    deadlines: FxHashMap<PlayerId, f64>,
}

impl RemovalScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a removal for `owner` to fire `delay` seconds after `now`.
    ///
    /// Replaces any pending removal for the same owner: the old deadline is
    /// discarded and the clock restarts.
    pub fn schedule(&mut self, owner: PlayerId, now: f64, delay: f64) {
        self.deadlines.insert(owner, now + delay);
    }

    /// Cancel the owner's pending removal. Returns whether one existed.
    pub fn cancel(&mut self, owner: PlayerId) -> bool {
        self.deadlines.remove(&owner).is_some()
    }

    /// Cancel every pending removal.
    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    /// Whether the owner has a pending removal.
    #[must_use]
    pub fn is_pending(&self, owner: PlayerId) -> bool {
        self.deadlines.contains_key(&owner)
    }

    /// Number of pending removals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Pop every removal whose deadline has elapsed at `now`.
    ///
    /// Entries self-remove before the caller acts on them, so a removal that
    /// re-schedules during handling starts from `NoPending` again. Returned
    /// owners are ordered by (deadline, owner) for deterministic handling.
    pub fn fire_due(&mut self, now: f64) -> Vec<PlayerId> {
        let mut due: Vec<(f64, PlayerId)> = self
            .deadlines
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(&owner, &deadline)| (deadline, owner))
            .collect();
        due.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        for (_, owner) in &due {
            self.deadlines.remove(owner);
        }
        due.into_iter().map(|(_, owner)| owner).collect()
    }
}
