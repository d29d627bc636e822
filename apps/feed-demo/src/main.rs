//! Scripted feed session against the wall clock.
//!
//! Plays through a short sequence of user input (taps, a double tap, a hold,
//! a flick and some shortcuts) and prints the events the engine reports.
//! Run with `RUST_LOG=reelfeed_core=debug` to see the engine's own log.

use reelfeed_core::{
    ready_play, FeedController, FeedEvent, FeedItem, FeedSettings, MediaError, MediaHandle,
    OverlayKind, PlayError, PlayRequest, Point, ShareError, ShareSink, SystemClock,
};
use std::time::Duration;
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);
const VIEWPORT_HEIGHT: f32 = 844.0;
const DEFAULT_ITEMS: u64 = 6;

/// Media element stand-in that logs and tracks a play position.
struct ConsoleMedia {
    index: usize,
    started: Option<Instant>,
    played: Duration,
    /// Reject the first play request, as a browser blocking autoplay would.
    block_first_play: bool,
}

impl ConsoleMedia {
    fn new(index: usize, block_first_play: bool) -> Self {
        Self {
            index,
            started: None,
            played: Duration::ZERO,
            block_first_play,
        }
    }
}

impl MediaHandle for ConsoleMedia {
    fn play(&mut self) -> PlayRequest {
        if std::mem::take(&mut self.block_first_play) {
            log::info!("media {}: autoplay blocked", self.index);
            return ready_play(Err(PlayError::Blocked));
        }
        log::info!("media {}: play", self.index);
        self.started.get_or_insert_with(Instant::now);
        ready_play(Ok(()))
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        if let Some(started) = self.started.take() {
            self.played += started.elapsed();
            log::info!("media {}: pause at {:?}", self.index, self.played);
        }
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), MediaError> {
        log::trace!("media {}: muted={muted}", self.index);
        Ok(())
    }

    fn position(&self) -> Duration {
        self.played + self.started.map(|started| started.elapsed()).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(20))
    }
}

/// Share capabilities of a terminal: no native sheet, no clipboard.
struct HeadlessShare;

impl ShareSink for HeadlessShare {
    fn native_share(&mut self, _title: &str, _url: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }

    fn copy_link(&mut self, _url: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn items(count: usize, block_autoplay: bool) -> Vec<(FeedItem, Box<dyn MediaHandle>)> {
    (0..count)
        .map(|index| {
            let mut item = FeedItem::new(
                format!("reel-{index}"),
                format!("https://cdn.example.test/reels/{index}.mp4"),
                format!("creator{index}"),
            );
            if index == 2 {
                item = item.spoiler();
            }
            let media: Box<dyn MediaHandle> =
                Box::new(ConsoleMedia::new(index, block_autoplay && index == 0));
            (item, media)
        })
        .collect()
}

/// Runs frames for `duration`, printing whatever the engine reports.
fn run_for(feed: &mut FeedController<SystemClock>, duration: Duration) {
    let until = Instant::now() + duration;
    while Instant::now() < until {
        feed.on_frame();
        report(feed);
        std::thread::sleep(FRAME);
    }
}

fn report(feed: &mut FeedController<SystemClock>) {
    for event in feed.take_events() {
        match event {
            FeedEvent::LoadMoreRequested { loaded } => {
                println!("  -> load more after {loaded} items");
            }
            other => println!("  -> {other:?}"),
        }
    }
}

fn step(feed: &FeedController<SystemClock>, label: &str) {
    let snapshot = feed.snapshot();
    println!(
        "[{label}] active={:?} paused={} muted={} hud={} bursts={} progress={:?}",
        snapshot.active_index,
        snapshot.paused,
        snapshot.muted,
        snapshot.hud_visible,
        snapshot.bursts.len(),
        snapshot.progress,
    );
}

fn main() {
    #[cfg(all(feature = "logging", not(target_arch = "wasm32")))]
    env_logger::init();

    let count = env_u64("FEED_DEMO_ITEMS", DEFAULT_ITEMS).max(3) as usize;
    let block_autoplay = env_u64("FEED_DEMO_BLOCK_AUTOPLAY", 0) != 0;
    println!("=== Feed demo: {count} items ===");

    let settings = FeedSettings::default().with_hide_spoilers(true);
    let mut feed = FeedController::new(settings);
    feed.on_resize(VIEWPORT_HEIGHT);
    feed.append_items(items(count, block_autoplay));
    report(&mut feed);
    step(&feed, "loaded");

    if feed.is_paused() {
        println!("autoplay was blocked; starting manually");
        feed.toggle_pause();
        report(&mut feed);
    }

    let center = Point::new(195.0, VIEWPORT_HEIGHT / 2.0);

    // Single tap: pauses once the double-tap window elapses.
    feed.on_pointer_down(0, center);
    feed.on_pointer_up(center);
    run_for(&mut feed, Duration::from_millis(350));
    step(&feed, "single tap");

    feed.toggle_pause();
    report(&mut feed);

    // Double tap: likes and spawns a burst.
    for _ in 0..2 {
        feed.on_pointer_down(0, center);
        feed.on_pointer_up(center);
        run_for(&mut feed, Duration::from_millis(120));
    }
    step(&feed, "double tap");

    // Hold: paused while pressed, resumed on release.
    feed.on_pointer_down(0, center);
    run_for(&mut feed, Duration::from_millis(400));
    step(&feed, "holding");
    feed.on_pointer_up(center);
    report(&mut feed);

    // Flick to the next item, many samples per frame.
    for sample in 1..=12 {
        feed.on_scroll(sample as f32 * VIEWPORT_HEIGHT / 12.0);
    }
    run_for(&mut feed, Duration::from_millis(100));
    step(&feed, "flick");

    // The spoiler is gated until revealed.
    feed.on_key("ArrowDown");
    run_for(&mut feed, Duration::from_millis(50));
    step(&feed, "spoiler");
    feed.reveal_item(2);
    report(&mut feed);

    feed.on_key("m");
    if feed.open_overlay(OverlayKind::Share, feed.active_index()) {
        let url = format!("https://reels.example.test/{}", feed.active_index());
        let outcome = feed.share_item(feed.active_index(), &url, &mut HeadlessShare);
        println!("share outcome: {outcome:?}");
        feed.close_overlay();
    }
    report(&mut feed);

    run_for(&mut feed, Duration::from_millis(2_000));
    step(&feed, "idle");

    feed.teardown();
    println!("=== done ===");
}
