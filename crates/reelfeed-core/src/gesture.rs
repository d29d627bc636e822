//! Tap, double tap and hold-to-pause classification for the active item.
//!
//! # Overview
//! This module separates:
//! - **State** ([`PointerSession`]) - one press, from down to up/cancel
//! - **Detection** ([`GestureDisambiguator`]) - consumes pointer events and
//!   timer firings and reports classified [`GestureAction`]s
//!
//! Neither knows about rendering or playback; the controller applies the
//! actions.
//!
//! # Gesture Flow
//! 1. **Down**: open a session. If the item is playing, arm the hold timer
//!    (220 ms).
//! 2. **Move**: once the pointer strays more than 12 px on either axis the
//!    session is a scroll/drag. It stays disqualified and the hold timer is
//!    cancelled.
//! 3. **Hold fires**: pause for the duration of the press.
//! 4. **Up**:
//!    - after a hold: resume, no tap classification
//!    - after a move: nothing
//!    - within 280 ms of the previous completed tap: double tap
//!    - otherwise: arm the 280 ms tap window; if it elapses with no second
//!      tap, single tap
//! 5. **Cancel**: discard the session with no classification.

use crate::geometry::Point;
use crate::scheduler::{FiredTimer, Scheduler, TimerKind, TimerSlot};
use crate::settings::FeedConfig;
use std::time::Duration;

/// Ephemeral state of one press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSession {
    /// Item the press started on.
    pub item: usize,
    /// Position where the pointer went down.
    pub start: Point,
    pub started_at: Duration,
    /// Crossed the move threshold at some point. Permanent for the session.
    pub moved: bool,
    /// The hold timer was armed on down.
    pub hold_armed: bool,
    /// The hold timer fired and paused playback.
    pub hold_triggered: bool,
}

impl PointerSession {
    fn new(item: usize, start: Point, started_at: Duration, hold_armed: bool) -> Self {
        Self {
            item,
            start,
            started_at,
            moved: false,
            hold_armed,
            hold_triggered: false,
        }
    }
}

/// Classified user intent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    /// Press held long enough: pause while held.
    HoldPause { item: usize },
    /// Held press released (or interrupted): resume.
    HoldRelease { item: usize },
    /// Two taps within the window: like, with a burst at `at`.
    DoubleTap { item: usize, at: Point },
    /// One tap with no follow-up: toggle play/pause.
    SingleTap { item: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CompletedTap {
    item: usize,
    at: Duration,
}

#[derive(Debug)]
pub struct GestureDisambiguator {
    move_threshold: f32,
    hold_delay: Duration,
    double_tap_window: Duration,
    session: Option<PointerSession>,
    last_tap: Option<CompletedTap>,
    hold_timer: TimerSlot,
    tap_timer: TimerSlot,
}

impl GestureDisambiguator {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            move_threshold: config.move_threshold,
            hold_delay: config.hold_delay,
            double_tap_window: config.double_tap_window,
            session: None,
            last_tap: None,
            hold_timer: TimerSlot::new(),
            tap_timer: TimerSlot::new(),
        }
    }

    pub fn session(&self) -> Option<&PointerSession> {
        self.session.as_ref()
    }

    /// A single tap is waiting for its window to elapse.
    pub fn is_tap_pending(&self) -> bool {
        self.tap_timer.is_armed()
    }

    /// Opens a session. Returns `false` (and ignores the event) while a
    /// previous session is still open.
    pub fn on_down(
        &mut self,
        scheduler: &mut Scheduler,
        now: Duration,
        item: usize,
        position: Point,
        item_playing: bool,
    ) -> bool {
        if let Some(open) = &self.session {
            log::trace!(
                "pointer down on {item} ignored: session on {} still open",
                open.item
            );
            return false;
        }

        if item_playing {
            self.hold_timer
                .arm(scheduler, now + self.hold_delay, TimerKind::HoldArm);
        }
        self.session = Some(PointerSession::new(item, position, now, item_playing));
        true
    }

    pub fn on_move(&mut self, scheduler: &mut Scheduler, position: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.moved && session.start.exceeds(position, self.move_threshold) {
            log::trace!("session on {} became a drag", session.item);
            session.moved = true;
            if !session.hold_triggered {
                self.hold_timer.cancel(scheduler);
            }
        }
    }

    pub fn on_up(
        &mut self,
        scheduler: &mut Scheduler,
        now: Duration,
        position: Point,
    ) -> Option<GestureAction> {
        let mut session = self.session.take()?;
        self.hold_timer.cancel(scheduler);

        if !session.moved && session.start.exceeds(position, self.move_threshold) {
            session.moved = true;
        }

        if session.hold_triggered {
            return Some(GestureAction::HoldRelease { item: session.item });
        }
        if session.moved {
            return None;
        }

        let item = session.item;
        let is_double = self.last_tap.is_some_and(|previous| {
            previous.item == item && now.saturating_sub(previous.at) <= self.double_tap_window
        });
        self.last_tap = Some(CompletedTap { item, at: now });

        if is_double {
            self.tap_timer.cancel(scheduler);
            log::debug!("double tap on {item}");
            Some(GestureAction::DoubleTap { item, at: position })
        } else {
            self.tap_timer
                .arm(scheduler, now + self.double_tap_window, TimerKind::TapWindow);
            None
        }
    }

    /// Discards the open session. A press that already paused for hold is
    /// released so playback does not stay stuck.
    pub fn on_cancel(&mut self, scheduler: &mut Scheduler) -> Option<GestureAction> {
        let session = self.session.take()?;
        self.hold_timer.cancel(scheduler);
        log::trace!("session on {} cancelled", session.item);
        session
            .hold_triggered
            .then_some(GestureAction::HoldRelease { item: session.item })
    }

    /// Handles a fired timer. Timers this detector does not own are ignored.
    pub fn on_timer(
        &mut self,
        scheduler: &mut Scheduler,
        fired: &FiredTimer,
    ) -> Option<GestureAction> {
        match fired.kind {
            TimerKind::HoldArm if self.hold_timer.claim(fired.id) => {
                let session = self.session.as_mut()?;
                if session.moved {
                    return None;
                }
                session.hold_triggered = true;
                // The press became a hold, not the second tap of a pair.
                self.tap_timer.cancel(scheduler);
                self.last_tap = None;
                log::debug!("hold on {}", session.item);
                Some(GestureAction::HoldPause { item: session.item })
            }
            TimerKind::TapWindow if self.tap_timer.claim(fired.id) => {
                let tap = self.last_tap.take()?;
                log::debug!("single tap on {}", tap.item);
                Some(GestureAction::SingleTap { item: tap.item })
            }
            _ => None,
        }
    }

    /// Forgets the previous tap and cancels the pending single tap, for
    /// example when the active item changes.
    pub fn forget_taps(&mut self, scheduler: &mut Scheduler) {
        self.tap_timer.cancel(scheduler);
        self.last_tap = None;
    }

    /// Cancels everything: open session, pending tap and hold timers.
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.session = None;
        self.hold_timer.cancel(scheduler);
        self.forget_taps(scheduler);
    }
}
