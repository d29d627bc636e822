//! Headless harness driving a [`FeedController`] on a [`ManualClock`].
//!
//! # Example
//!
//! ```
//! use reelfeed_testing::FeedTestRule;
//!
//! let mut rule = FeedTestRule::new(3);
//! rule.tap();
//! rule.advance_ms(300);
//! assert!(rule.controller().is_paused());
//! ```

use crate::fake_media::{FakeMedia, PlayScript};
use reelfeed_core::{
    FeedConfig, FeedController, FeedEvent, FeedItem, FeedSettings, ManualClock, Point,
};

/// Where presses land unless a test says otherwise.
pub const CENTER: Point = Point { x: 200.0, y: 400.0 };

/// Item `index` of the synthetic feed.
pub fn sample_item(index: usize) -> FeedItem {
    FeedItem::new(
        format!("item-{index}"),
        format!("https://cdn.example.test/{index}.mp4"),
        format!("author-{index}"),
    )
}

pub struct FeedTestRule {
    controller: FeedController<ManualClock>,
    clock: ManualClock,
    media: Vec<FakeMedia>,
}

impl FeedTestRule {
    /// Feed of `count` items with default settings, all playing on request.
    pub fn new(count: usize) -> Self {
        Self::with_settings(FeedSettings::default(), count)
    }

    pub fn with_settings(settings: FeedSettings, count: usize) -> Self {
        let mut rule = Self::empty(settings);
        rule.append(count);
        rule
    }

    /// Feed with no items yet.
    pub fn empty(settings: FeedSettings) -> Self {
        let clock = ManualClock::new();
        let controller = FeedController::with_clock(FeedConfig::default(), settings, clock.clone());
        Self {
            controller,
            clock,
            media: Vec::new(),
        }
    }

    /// Appends `count` synthetic items whose play requests resolve.
    pub fn append(&mut self, count: usize) {
        let start = self.media.len();
        let items = (start..start + count)
            .map(|index| (sample_item(index), PlayScript::Resolve))
            .collect();
        self.append_items(items);
    }

    /// Appends items with a scripted play outcome each.
    pub fn append_items(&mut self, items: Vec<(FeedItem, PlayScript)>) {
        let mut batch = Vec::with_capacity(items.len());
        for (item, script) in items {
            let media = FakeMedia::with_script(script);
            batch.push((item, media.boxed()));
            self.media.push(media);
        }
        log::debug!("test rule appending {} items", batch.len());
        self.controller.append_items(batch);
    }

    pub fn controller(&self) -> &FeedController<ManualClock> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FeedController<ManualClock> {
        &mut self.controller
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn media(&self, index: usize) -> &FakeMedia {
        &self.media[index]
    }

    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Media elements that are actually running.
    pub fn elements_playing(&self) -> usize {
        self.media
            .iter()
            .filter(|media| media.is_element_playing())
            .count()
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Runs one frame without moving time.
    pub fn frame(&mut self) {
        self.controller.on_frame();
    }

    /// Moves time forward by `ms` and runs one frame.
    pub fn advance_ms(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.controller.on_frame();
    }

    /// Moves time forward in frame-sized steps, running a frame at each.
    pub fn advance_frames(&mut self, count: u32, frame_ms: u64) {
        for _ in 0..count {
            self.advance_ms(frame_ms);
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn resize(&mut self, height: f32) {
        self.controller.on_resize(height);
        self.controller.on_frame();
    }

    /// Delivers one raw scroll sample and runs a frame.
    pub fn scroll_to_offset(&mut self, offset: f32) {
        self.controller.on_scroll(offset);
        self.controller.on_frame();
    }

    /// Scrolls so item `index` snaps into the viewport of `height`.
    pub fn scroll_to_item(&mut self, index: usize, height: f32) {
        self.scroll_to_offset(index as f32 * height);
    }

    pub fn press(&mut self, at: Point) {
        let active = self.controller.active_index();
        self.controller.on_pointer_down(active, at);
    }

    pub fn press_item(&mut self, item: usize, at: Point) {
        self.controller.on_pointer_down(item, at);
    }

    pub fn move_to(&mut self, at: Point) {
        self.controller.on_pointer_move(at);
    }

    pub fn release(&mut self, at: Point) {
        self.controller.on_pointer_up(at);
    }

    pub fn cancel(&mut self) {
        self.controller.on_pointer_cancel();
    }

    /// Quick press and release at [`CENTER`] without moving time.
    pub fn tap(&mut self) {
        self.tap_at(CENTER);
    }

    pub fn tap_at(&mut self, at: Point) {
        self.press(at);
        self.release(at);
    }

    /// Two taps `gap_ms` apart at `at`.
    pub fn double_tap_at(&mut self, at: Point, gap_ms: u64) {
        self.tap_at(at);
        self.advance_ms(gap_ms);
        self.tap_at(at);
    }

    /// Press at [`CENTER`] held for `ms`, then released.
    pub fn hold(&mut self, ms: u64) {
        self.press(CENTER);
        self.advance_ms(ms);
        self.release(CENTER);
    }

    /// Press, drag by `dy`, release. A drag is never a tap.
    pub fn drag(&mut self, dy: f32) {
        let end = Point::new(CENTER.x, CENTER.y + dy);
        self.press(CENTER);
        self.move_to(end);
        self.release(end);
    }

    pub fn key(&mut self, key: &str) -> bool {
        self.controller.on_key(key)
    }

    // ========================================================================
    // Output
    // ========================================================================

    pub fn take_events(&mut self) -> Vec<FeedEvent> {
        self.controller.take_events()
    }

    pub fn events(&self) -> &[FeedEvent] {
        self.controller.peek_events()
    }
}
