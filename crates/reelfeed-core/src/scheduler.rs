//! Explicit timer table for every deferred callback in the engine.
//!
//! Timers are plain records keyed by [`TimerId`]. Nothing runs on its own:
//! the controller asks for the due timers once per frame and dispatches them
//! by [`TimerKind`]. Cancelling a timer removes its record, so a cancelled
//! timer can never fire against a torn-down or reused slot.

use crate::like_burst::BurstKey;
use smallvec::SmallVec;
use std::time::Duration;

/// Identifies one scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Press-and-hold arm delay of the open pointer session.
    HoldArm,
    /// Deferred single-tap classification.
    TapWindow,
    /// HUD auto-hide while playing.
    HudAutoHide,
    /// Removal of one like-burst token.
    BurstExpiry(BurstKey),
}

#[derive(Clone, Copy, Debug)]
struct ScheduledTimer {
    id: TimerId,
    deadline: Duration,
    kind: TimerKind,
}

/// A due timer handed back to the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub deadline: Duration,
    pub kind: TimerKind,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    timers: Vec<ScheduledTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to fire once `now >= deadline`.
    pub fn schedule(&mut self, deadline: Duration, kind: TimerKind) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(ScheduledTimer { id, deadline, kind });
        log::trace!("timer {:?} scheduled for {:?} at {:?}", id, kind, deadline);
        id
    }

    /// Removes a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        before != self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// Removes and returns every timer whose deadline has passed, earliest
    /// first. Ties keep scheduling order.
    pub fn take_due(&mut self, now: Duration) -> SmallVec<[FiredTimer; 4]> {
        let mut due: SmallVec<[FiredTimer; 4]> = SmallVec::new();
        self.timers.retain(|timer| {
            if timer.deadline <= now {
                due.push(FiredTimer {
                    id: timer.id,
                    deadline: timer.deadline,
                    kind: timer.kind,
                });
                false
            } else {
                true
            }
        });
        due.sort_by_key(|fired| (fired.deadline, fired.id));
        due
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.deadline).min()
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("cancelling {} pending timers", self.timers.len());
        }
        self.timers.clear();
    }
}

/// Holder for at most one timer of a given role.
///
/// Arming always cancels the previous timer first, so a slot never has two
/// live timers behind it.
#[derive(Debug, Default)]
pub struct TimerSlot {
    id: Option<TimerId>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, scheduler: &mut Scheduler, deadline: Duration, kind: TimerKind) {
        self.cancel(scheduler);
        self.id = Some(scheduler.schedule(deadline, kind));
    }

    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.id.take() {
            scheduler.cancel(id);
        }
    }

    /// Returns `true` and disarms the slot if `id` is the timer it holds.
    /// Called by the dispatcher when a timer fires.
    pub fn claim(&mut self, id: TimerId) -> bool {
        if self.id == Some(id) {
            self.id = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.id.is_some()
    }
}
