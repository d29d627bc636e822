//! Loading, measuring, scrolling and tearing down a feed.

use reelfeed_core::{
    FeedConfig, FeedController, FeedEvent, FeedSettings, KeyCommand, ManualClock, MediaHandle,
    OverlayKind,
};
use reelfeed_testing::feed_assertions::{assert_count, assert_emitted, count_events};
use reelfeed_testing::{sample_item, FakeMedia, FeedTestRule};

fn load_more_requests(events: &[FeedEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            FeedEvent::LoadMoreRequested { loaded } => Some(*loaded),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_feed_is_inert() {
    let mut rule = FeedTestRule::empty(FeedSettings::default());
    rule.scroll_to_offset(2_000.0);
    rule.tap();
    assert!(!rule.key("ArrowDown"));
    rule.advance_ms(500);

    let snapshot = rule.controller().snapshot();
    assert_eq!(snapshot.active_index, None);
    assert!(snapshot.engagement.is_empty());
    assert!(rule.take_events().iter().all(|e| matches!(e, FeedEvent::ScrollStarted)));
}

#[test]
fn first_items_activate_index_zero() {
    let mut rule = FeedTestRule::empty(FeedSettings::default());
    rule.append(10);
    let events = rule.take_events();
    assert_eq!(events[0], FeedEvent::ActiveItemChanged { index: 0 });
    assert!(rule.controller().snapshot().scroll_hint_visible);

    rule.append(5);
    assert_eq!(
        count_events(&rule.take_events(), |e| matches!(e, FeedEvent::ActiveItemChanged { .. })),
        0
    );
}

#[test]
fn load_more_is_requested_once_per_page() {
    let mut rule = FeedTestRule::new(10);
    assert!(load_more_requests(&rule.take_events()).is_empty());

    rule.scroll_to_item(6, 800.0);
    assert!(load_more_requests(&rule.take_events()).is_empty());
    rule.scroll_to_item(7, 800.0);
    assert_eq!(load_more_requests(&rule.take_events()), vec![10]);
    rule.scroll_to_item(8, 800.0);
    assert!(load_more_requests(&rule.take_events()).is_empty());

    rule.append(5);
    assert!(load_more_requests(&rule.take_events()).is_empty());
    rule.scroll_to_item(12, 800.0);
    assert_eq!(load_more_requests(&rule.take_events()), vec![15]);
}

#[test]
fn scroll_samples_coalesce_per_frame() {
    let mut rule = FeedTestRule::new(10);
    rule.take_events();

    let controller = rule.controller_mut();
    controller.on_scroll(300.0);
    controller.on_scroll(900.0);
    controller.on_scroll(1_700.0);
    assert_eq!(controller.active_index(), 0);

    rule.frame();
    let events = rule.take_events();
    assert_eq!(
        events,
        vec![
            FeedEvent::ScrollStarted,
            FeedEvent::ActiveItemChanged { index: 2 },
        ]
    );
    assert_eq!(rule.media(1).play_calls(), 0);
}

#[test]
fn scroll_hint_dismissed_past_threshold() {
    let mut rule = FeedTestRule::new(5);
    rule.scroll_to_offset(10.0);
    assert!(rule.controller().snapshot().scroll_hint_visible);
    rule.scroll_to_offset(30.0);
    assert!(!rule.controller().snapshot().scroll_hint_visible);
    assert_emitted(&rule.take_events(), &FeedEvent::ScrollStarted, "hint");

    rule.scroll_to_offset(0.0);
    assert!(!rule.controller().snapshot().scroll_hint_visible);
}

#[test]
fn measured_height_drives_resolution() {
    let mut rule = FeedTestRule::new(5);
    rule.resize(400.0);
    rule.scroll_to_offset(1_100.0);
    assert_eq!(rule.controller().active_index(), 3);
}

#[test]
fn unmeasurable_height_falls_back() {
    let mut rule = FeedTestRule::new(5);
    rule.resize(0.0);
    rule.resize(f32::NAN);
    rule.scroll_to_offset(1_605.0);
    assert_eq!(rule.controller().active_index(), 2);
}

#[test]
fn offsets_beyond_the_list_clamp() {
    let mut rule = FeedTestRule::new(3);
    rule.scroll_to_offset(99_999.0);
    assert_eq!(rule.controller().active_index(), 2);
    rule.scroll_to_offset(-300.0);
    assert_eq!(rule.controller().active_index(), 0);
}

#[test]
fn engagement_toggles_are_reported_and_snapshotted() {
    let mut rule = FeedTestRule::new(3);
    rule.take_events();

    let controller = rule.controller_mut();
    assert_eq!(controller.toggle_save(1), Some(true));
    assert_eq!(controller.toggle_follow(2), Some(true));
    assert_eq!(controller.toggle_follow(2), Some(false));
    assert_eq!(controller.toggle_like(7), None);
    controller.set_liked(0, true);
    controller.set_liked(0, true);

    let snapshot = controller.snapshot();
    assert_count(&snapshot.engagement, 3, "one entry per item");
    assert!(snapshot.engagement[1].1.saved);
    assert!(!snapshot.engagement[2].1.following);
    assert!(snapshot.engagement[0].1.liked);

    let events = rule.take_events();
    assert_eq!(
        events,
        vec![
            FeedEvent::SaveToggled {
                id: sample_item(1).id,
                saved: true
            },
            FeedEvent::FollowToggled {
                id: sample_item(2).id,
                following: true
            },
            FeedEvent::FollowToggled {
                id: sample_item(2).id,
                following: false
            },
            FeedEvent::LikeToggled {
                id: sample_item(0).id,
                liked: true
            },
        ]
    );
}

#[test]
fn teardown_cancels_timers_and_stops_media() {
    let mut rule = FeedTestRule::new(3);
    rule.tap();
    rule.advance_ms(100);
    rule.tap();
    rule.press(reelfeed_testing::CENTER);
    assert!(rule.controller().pending_timers() > 0);

    rule.controller_mut().teardown();
    assert_eq!(rule.controller().pending_timers(), 0);
    assert_eq!(rule.controller().next_deadline(), None);
    assert_eq!(rule.elements_playing(), 0);
    assert_eq!(rule.controller().playing_count(), 0);
    rule.take_events();

    // Nothing fires or reacts afterwards.
    rule.advance_ms(5_000);
    rule.scroll_to_offset(1_600.0);
    assert!(!rule.key("ArrowDown"));
    rule.controller_mut().set_paused(true);
    assert!(rule.take_events().is_empty());
    assert!(rule.controller().is_torn_down());
}

#[test]
fn intents_after_teardown_are_ignored() {
    let mut rule = FeedTestRule::new(4);
    rule.controller_mut().teardown();
    rule.take_events();
    let play_calls = rule.media(1).play_calls();

    let controller = rule.controller_mut();
    controller.set_active_index(1);
    controller.scroll_to_index(2);
    controller.run_command(KeyCommand::TogglePause);
    assert_eq!(controller.toggle_like(0), None);
    assert_eq!(controller.toggle_save(0), None);
    assert_eq!(controller.toggle_follow(0), None);
    controller.set_liked(0, true);
    controller.reveal_item(0);
    controller.set_settings(FeedSettings::default().with_hide_spoilers(true));
    assert!(!controller.open_overlay(OverlayKind::Comments, 0));
    controller.on_resize(400.0);
    controller.on_pointer_cancel();

    assert_eq!(controller.active_index(), 0);
    assert_eq!(controller.playing_count(), 0);
    assert_eq!(controller.pending_timers(), 0);
    assert!(!controller.engagement(0).liked);
    assert_eq!(rule.media(1).play_calls(), play_calls);
    assert_eq!(rule.elements_playing(), 0);
    assert!(rule.take_events().is_empty());
}

#[test]
fn dropping_the_controller_pauses_media() {
    let media = FakeMedia::new();
    {
        let mut controller = FeedController::with_clock(
            FeedConfig::default(),
            FeedSettings::default(),
            ManualClock::new(),
        );
        let handle: Box<dyn MediaHandle> = media.boxed();
        controller.append_items(vec![(sample_item(0), handle)]);
        assert!(media.is_element_playing());
    }
    assert!(!media.is_element_playing());
}
