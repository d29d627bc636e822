//! Assertion helpers for feed tests.

use reelfeed_core::{FeedController, FeedEvent, FrameClock, PlaybackState};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a collection has an expected count.
pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}",
        msg,
        expected,
        items.len()
    );
}

/// Assert that no more than one item is in the `Playing` state.
pub fn assert_single_playing<C: FrameClock>(controller: &FeedController<C>, msg: &str) {
    let playing = controller.playing_count();
    assert!(
        playing <= 1,
        "{}: {} items playing at once",
        msg,
        playing
    );
}

/// Assert that exactly `index` is playing.
pub fn assert_playing<C: FrameClock>(controller: &FeedController<C>, index: usize, msg: &str) {
    assert_eq!(
        controller.playback_state(index),
        Some(PlaybackState::Playing),
        "{}: item {} not playing",
        msg,
        index
    );
    assert_single_playing(controller, msg);
}

/// Assert that nothing is playing.
pub fn assert_none_playing<C: FrameClock>(controller: &FeedController<C>, msg: &str) {
    assert_eq!(
        controller.playing_count(),
        0,
        "{}: expected no playback",
        msg
    );
}

/// Assert that `events` contains `expected`.
pub fn assert_emitted(events: &[FeedEvent], expected: &FeedEvent, msg: &str) {
    assert!(
        events.contains(expected),
        "{}: {:?} not found in {:?}",
        msg,
        expected,
        events
    );
}

/// Assert that `events` has no event matching `pred`.
pub fn assert_not_emitted(events: &[FeedEvent], pred: impl Fn(&FeedEvent) -> bool, msg: &str) {
    assert!(
        !events.iter().any(pred),
        "{}: unexpected event in {:?}",
        msg,
        events
    );
}

/// Counts the events matching `pred`.
pub fn count_events(events: &[FeedEvent], pred: impl Fn(&FeedEvent) -> bool) -> usize {
    events.iter().filter(|event| pred(event)).count()
}
