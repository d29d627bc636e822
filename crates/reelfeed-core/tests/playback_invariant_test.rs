//! Single-playing invariant, mute propagation, rejected and late play
//! requests at the controller level.

use reelfeed_core::{FeedEvent, FeedSettings, PlayError, PlaybackState};
use reelfeed_testing::feed_assertions::{
    assert_approx_eq, assert_emitted, assert_none_playing, assert_playing, assert_single_playing,
};
use reelfeed_testing::{sample_item, FeedTestRule, PlayScript};
use std::time::Duration;

/// Small deterministic generator so the walk is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

#[test]
fn never_more_than_one_playing() {
    let mut rule = FeedTestRule::new(8);
    rule.resize(640.0);
    let mut rng = Lcg(7);

    for step in 0..400 {
        match rng.next(6) {
            0 | 1 => {
                let offset = rng.next(8 * 640) as f32;
                rule.controller_mut().on_scroll(offset);
            }
            2 => rule.controller_mut().toggle_mute(),
            3 => rule.controller_mut().set_active_index(rng.next(10) as usize),
            4 => rule.controller_mut().toggle_pause(),
            _ => rule.advance_ms(16),
        }
        rule.frame();

        let controller = rule.controller();
        assert_single_playing(controller, &format!("step {step}"));
        assert!(rule.elements_playing() <= 1, "step {step}");
        if controller.is_paused() {
            assert_none_playing(controller, &format!("paused at step {step}"));
        } else {
            assert_playing(controller, controller.active_index(), &format!("step {step}"));
        }
    }
}

#[test]
fn mute_applies_to_every_handle() {
    let mut rule = FeedTestRule::new(4);
    for index in 0..4 {
        assert_eq!(rule.media(index).muted(), Some(true));
    }

    rule.controller_mut().toggle_mute();
    for index in 0..4 {
        assert_eq!(rule.media(index).muted(), Some(false), "item {index}");
    }
    assert_emitted(&rule.take_events(), &FeedEvent::MuteToggled { muted: false }, "mute");

    // Late arrivals pick up the current flag.
    rule.append(2);
    assert_eq!(rule.media(5).muted(), Some(false));
}

#[test]
fn unmuted_by_default_setting() {
    let rule = FeedTestRule::with_settings(FeedSettings::default().with_mute_by_default(false), 2);
    assert!(!rule.controller().is_muted());
    assert_eq!(rule.media(1).muted(), Some(false));
}

#[test]
fn resume_does_not_seek() {
    let mut rule = FeedTestRule::new(3);
    rule.media(0).set_position(Duration::from_secs(4));
    rule.scroll_to_item(1, 800.0);
    rule.scroll_to_item(0, 800.0);
    assert_playing(rule.controller(), 0, "back on first");
    assert_eq!(rule.media(0).play_calls(), 2);
    assert_eq!(rule.controller().snapshot().progress, Some(4.0 / 15.0));
}

#[test]
fn progress_tracks_active_handle() {
    let mut rule = FeedTestRule::new(2);
    rule.media(0).set_duration(Some(Duration::from_secs(12)));
    rule.media(0).set_position(Duration::from_secs(3));
    let progress = rule.controller().progress().unwrap();
    assert_approx_eq(progress, 0.25, 0.0001, "progress");

    rule.media(0).set_duration(None);
    assert_eq!(rule.controller().progress(), None);
}

#[test]
fn blocked_autoplay_pauses_and_raises_hud() {
    let mut rule = FeedTestRule::empty(FeedSettings::default());
    rule.append_items(vec![
        (sample_item(0), PlayScript::Reject(PlayError::Blocked)),
        (sample_item(1), PlayScript::Resolve),
    ]);

    let controller = rule.controller();
    assert!(controller.is_paused());
    assert!(controller.is_hud_visible());
    assert_eq!(controller.playback_state(0), Some(PlaybackState::PlayRejected));
    assert_none_playing(controller, "blocked");
    assert_emitted(rule.events(), &FeedEvent::PlaybackBlocked { index: 0 }, "blocked");

    // Nothing hides the HUD while blocked.
    rule.advance_ms(5_000);
    assert!(rule.controller().is_hud_visible());

    // The user starts playback explicitly.
    rule.media(0).set_script(PlayScript::Resolve);
    rule.controller_mut().toggle_pause();
    assert_playing(rule.controller(), 0, "manual play");
}

#[test]
fn blocked_item_reports_once_per_attempt() {
    let mut rule = FeedTestRule::empty(FeedSettings::default());
    rule.append_items(vec![(sample_item(0), PlayScript::Reject(PlayError::Blocked))]);
    rule.advance_frames(10, 16);
    let blocked = rule
        .take_events()
        .iter()
        .filter(|e| matches!(e, FeedEvent::PlaybackBlocked { .. }))
        .count();
    assert_eq!(blocked, 1);
}

#[test]
fn deferred_play_becomes_playing_when_it_resolves() {
    let mut rule = FeedTestRule::empty(FeedSettings::default());
    rule.append_items(vec![
        (sample_item(0), PlayScript::Resolve),
        (sample_item(1), PlayScript::Defer),
    ]);

    rule.scroll_to_item(1, 800.0);
    assert_none_playing(rule.controller(), "waiting on play");

    assert!(rule.media(1).resolve_play(Ok(())));
    rule.frame();
    assert_playing(rule.controller(), 1, "resolved");
}

#[test]
fn superseded_play_never_marks_playing() {
    let mut rule = FeedTestRule::empty(FeedSettings::default());
    rule.append_items(vec![
        (sample_item(0), PlayScript::Resolve),
        (sample_item(1), PlayScript::Defer),
        (sample_item(2), PlayScript::Resolve),
    ]);

    rule.scroll_to_item(1, 800.0);
    rule.scroll_to_item(2, 800.0);
    // The pause on leaving aborted the request.
    assert!(!rule.media(1).resolve_play(Ok(())));
    rule.frame();
    assert_playing(rule.controller(), 2, "latest target");
    assert_eq!(rule.controller().playback_state(1), Some(PlaybackState::Idle));
}

#[test]
fn paused_feed_does_not_play_new_items() {
    let mut rule = FeedTestRule::new(4);
    rule.controller_mut().set_paused(true);
    rule.scroll_to_item(2, 800.0);
    assert_none_playing(rule.controller(), "paused");
    assert_eq!(rule.media(2).play_calls(), 0);

    rule.controller_mut().set_paused(false);
    assert_playing(rule.controller(), 2, "unpaused");
}

#[test]
fn failing_pause_is_tolerated() {
    let mut rule = FeedTestRule::new(3);
    rule.media(0).set_fail_pause(true);
    rule.scroll_to_item(1, 800.0);
    assert_playing(rule.controller(), 1, "moved on");
    assert_eq!(rule.controller().playback_state(0), Some(PlaybackState::Paused));
}
