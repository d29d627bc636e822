//! User settings and product constants for the feed engine.

use std::time::Duration;

/// User/global settings supplied by the surrounding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedSettings {
    /// Start the session muted.
    pub mute_by_default: bool,
    /// Hide media of items flagged as spoilers.
    pub hide_spoilers: bool,
    /// Disable non-essential visual easing. Timer logic is unaffected.
    pub reduced_motion: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            mute_by_default: true,
            hide_spoilers: false,
            reduced_motion: false,
        }
    }
}

impl FeedSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mute_by_default(mut self, muted: bool) -> Self {
        self.mute_by_default = muted;
        self
    }

    pub fn with_hide_spoilers(mut self, hide: bool) -> Self {
        self.hide_spoilers = hide;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}

/// Timing and distance constants that define how the feed feels.
///
/// The defaults are product values and are reproduced exactly; they are
/// configurable only so hosts and tests can reason about them by name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedConfig {
    /// Movement (px, either axis) that turns a press into a scroll/drag.
    pub move_threshold: f32,
    /// Delay before a press on a playing item becomes hold-to-pause.
    pub hold_delay: Duration,
    /// Maximum gap between two completed taps for a double tap.
    pub double_tap_window: Duration,
    /// HUD auto-hide delay while the active item is playing.
    pub hud_auto_hide: Duration,
    /// Lifetime of a like-burst token.
    pub like_burst_lifetime: Duration,
    /// Scroll distance from the top that dismisses the onboarding hint.
    pub scroll_hint_distance: f32,
    /// Viewport height used before the first successful measurement.
    pub default_viewport_height: f32,
    /// Request more items once the active index is this close to the end.
    pub load_more_threshold: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            move_threshold: 12.0,
            hold_delay: Duration::from_millis(220),
            double_tap_window: Duration::from_millis(280),
            hud_auto_hide: Duration::from_millis(1900),
            like_burst_lifetime: Duration::from_millis(720),
            scroll_hint_distance: 18.0,
            default_viewport_height: 800.0,
            load_more_threshold: 3,
        }
    }
}
