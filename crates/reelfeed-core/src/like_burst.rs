//! Short-lived "like" acknowledgment tokens spawned at a double tap.
//!
//! Each token owns its own expiry timer, so spawning a new burst never
//! postpones or cancels the removal of an older one. The list is bounded by
//! `lifetime * spawn rate`.

use crate::geometry::Point;
use crate::scheduler::{FiredTimer, Scheduler, TimerId, TimerKind};
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BurstKey(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LikeBurst {
    pub key: BurstKey,
    pub at: Point,
    pub spawned_at: Duration,
    /// False under reduced motion: render statically.
    pub animated: bool,
    timer: TimerId,
}

#[derive(Debug)]
pub struct LikeBurstEmitter {
    lifetime: Duration,
    next_key: u64,
    bursts: SmallVec<[LikeBurst; 4]>,
}

impl LikeBurstEmitter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            next_key: 0,
            bursts: SmallVec::new(),
        }
    }

    pub fn spawn(
        &mut self,
        scheduler: &mut Scheduler,
        now: Duration,
        at: Point,
        animated: bool,
    ) -> BurstKey {
        self.next_key += 1;
        let key = BurstKey(self.next_key);
        let timer = scheduler.schedule(now + self.lifetime, TimerKind::BurstExpiry(key));
        self.bursts.push(LikeBurst {
            key,
            at,
            spawned_at: now,
            animated,
            timer,
        });
        log::trace!("burst {:?} spawned at ({}, {})", key, at.x, at.y);
        key
    }

    pub fn bursts(&self) -> &[LikeBurst] {
        &self.bursts
    }

    pub fn len(&self) -> usize {
        self.bursts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }

    /// Removes the token whose expiry fired. Returns `true` if one was removed.
    pub fn on_timer(&mut self, fired: &FiredTimer) -> bool {
        let TimerKind::BurstExpiry(key) = fired.kind else {
            return false;
        };
        let before = self.bursts.len();
        self.bursts
            .retain(|burst| !(burst.key == key && burst.timer == fired.id));
        let removed = before != self.bursts.len();
        if removed {
            log::trace!("burst {:?} expired", key);
        }
        removed
    }

    /// Drops every token and its timer.
    pub fn clear(&mut self, scheduler: &mut Scheduler) {
        for burst in self.bursts.drain(..) {
            scheduler.cancel(burst.timer);
        }
    }
}
