//! Transient play/pause/mute overlay visibility.

use crate::scheduler::{FiredTimer, Scheduler, TimerKind, TimerSlot};
use std::time::Duration;

/// Shows the HUD on qualifying events and hides it again after a fixed
/// delay, but only while the active item is playing.
///
/// Every qualifying event restarts the countdown from scratch (cancel, then
/// re-arm) instead of extending the existing deadline.
#[derive(Debug)]
pub struct HudVisibilityTimer {
    visible: bool,
    auto_hide: Duration,
    timer: TimerSlot,
}

impl HudVisibilityTimer {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            visible: true,
            auto_hide,
            timer: TimerSlot::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_counting_down(&self) -> bool {
        self.timer.is_armed()
    }

    /// Makes the HUD visible and restarts the countdown if `playing`;
    /// while paused it stays up indefinitely.
    pub fn show(&mut self, scheduler: &mut Scheduler, now: Duration, playing: bool) {
        if !self.visible {
            log::debug!("hud shown");
        }
        self.visible = true;
        if playing {
            self.timer
                .arm(scheduler, now + self.auto_hide, TimerKind::HudAutoHide);
        } else {
            self.timer.cancel(scheduler);
        }
    }

    /// Handles a fired timer. Returns `true` when the HUD was hidden.
    pub fn on_timer(&mut self, fired: &FiredTimer) -> bool {
        if fired.kind != TimerKind::HudAutoHide || !self.timer.claim(fired.id) {
            return false;
        }
        log::debug!("hud auto-hidden");
        self.visible = false;
        true
    }

    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        self.timer.cancel(scheduler);
    }
}
