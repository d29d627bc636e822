//! Central state object of the feed.
//!
//! [`FeedController`] owns every component and the single active index.
//! The host feeds it input (resize, scroll, frames, pointer, keys) and
//! drains [`FeedEvent`]s; all state changes go through the named intent
//! methods below so the playback invariant is enforced in one place.
//!
//! # Frame loop
//! ```text
//! on_scroll* ─┐
//!             ├─> on_frame: resolve index ─> sync playback ─> fire timers ─> poll play
//! pointer/key ┘
//! ```

use crate::active_index::ActiveIndexResolver;
use crate::clock::{FrameClock, SystemClock};
use crate::content_gate::ContentGate;
use crate::engagement::{Engagement, EngagementStore};
use crate::events::{EventQueue, FeedEvent, OverlayKind};
use crate::geometry::Point;
use crate::gesture::{GestureAction, GestureDisambiguator};
use crate::hud::HudVisibilityTimer;
use crate::item::{FeedItem, ItemId};
use crate::keyboard::KeyCommand;
use crate::like_burst::{LikeBurst, LikeBurstEmitter};
use crate::media::{progress_fraction, MediaHandle};
use crate::playback::{PlaybackCoordinator, PlaybackEvent, PlaybackState};
use crate::scheduler::Scheduler;
use crate::settings::{FeedConfig, FeedSettings};
use crate::share::{share_link, ShareOutcome, ShareSink};
use crate::viewport::ViewportTracker;
use std::time::Duration;

/// Read-only view of the engine state for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedSnapshot {
    /// `None` while the feed is empty.
    pub active_index: Option<usize>,
    pub paused: bool,
    pub muted: bool,
    pub hud_visible: bool,
    pub scroll_hint_visible: bool,
    /// The active item's media is hidden behind the spoiler placeholder.
    pub active_gated: bool,
    pub overlay: Option<OverlayKind>,
    pub bursts: Vec<LikeBurst>,
    pub progress: Option<f32>,
    /// Engagement flags in item order.
    pub engagement: Vec<(ItemId, Engagement)>,
}

pub struct FeedController<C: FrameClock = SystemClock> {
    config: FeedConfig,
    settings: FeedSettings,
    clock: C,
    scheduler: Scheduler,
    items: Vec<FeedItem>,
    viewport: ViewportTracker,
    resolver: ActiveIndexResolver,
    playback: PlaybackCoordinator,
    gestures: GestureDisambiguator,
    hud: HudVisibilityTimer,
    bursts: LikeBurstEmitter,
    engagement: EngagementStore,
    gate: ContentGate,
    paused: bool,
    muted: bool,
    overlay: Option<OverlayKind>,
    load_more_requested_for: Option<usize>,
    events: EventQueue,
    torn_down: bool,
}

impl FeedController<SystemClock> {
    /// Controller with the product defaults running on the wall clock.
    pub fn new(settings: FeedSettings) -> Self {
        Self::with_clock(FeedConfig::default(), settings, SystemClock::new())
    }
}

impl<C: FrameClock> FeedController<C> {
    pub fn with_clock(config: FeedConfig, settings: FeedSettings, clock: C) -> Self {
        let muted = settings.mute_by_default;
        Self {
            scheduler: Scheduler::new(),
            items: Vec::new(),
            viewport: ViewportTracker::new(config.default_viewport_height),
            resolver: ActiveIndexResolver::new(config.scroll_hint_distance),
            playback: PlaybackCoordinator::new(muted),
            gestures: GestureDisambiguator::new(&config),
            hud: HudVisibilityTimer::new(config.hud_auto_hide),
            bursts: LikeBurstEmitter::new(config.like_burst_lifetime),
            engagement: EngagementStore::new(),
            gate: ContentGate::new(),
            paused: false,
            muted,
            overlay: None,
            load_more_requested_for: None,
            events: EventQueue::new(),
            torn_down: false,
            config,
            settings,
            clock,
        }
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Appends items loaded by the data source, each with its media handle.
    pub fn append_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (FeedItem, Box<dyn MediaHandle>)>,
    {
        if self.torn_down {
            return;
        }
        let was_empty = self.items.is_empty();
        for (item, handle) in items {
            self.playback.push(handle);
            self.items.push(item);
        }
        log::debug!("feed now holds {} items", self.items.len());
        if self.items.is_empty() {
            return;
        }

        if was_empty {
            self.events
                .push(FeedEvent::ActiveItemChanged { index: self.active_index() });
            self.sync_playback();
            self.show_hud();
        } else {
            self.sync_playback();
        }
        self.maybe_request_more();
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&FeedItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ========================================================================
    // Measurement input
    // ========================================================================

    pub fn on_resize(&mut self, height: f32) {
        if self.torn_down {
            return;
        }
        if self.viewport.on_resize(height) {
            self.resolver.request_resolution();
        }
    }

    /// Raw scroll sample. Resolved on the next [`on_frame`](Self::on_frame).
    pub fn on_scroll(&mut self, offset: f32) {
        if self.torn_down {
            return;
        }
        self.resolver.on_scroll(offset);
    }

    /// Per-frame work: resolves coalesced scroll samples, then runs timers
    /// and polls the outstanding play request.
    pub fn on_frame(&mut self) {
        if self.torn_down {
            return;
        }
        let resolution = self
            .resolver
            .resolve_frame(self.viewport.height(), self.items.len());
        if resolution.scroll_started {
            self.events.push(FeedEvent::ScrollStarted);
        }
        if let Some(index) = resolution.changed_to {
            self.on_active_changed(index);
        }
        self.tick();
    }

    /// Fires due timers and polls playback without resolving scroll.
    pub fn tick(&mut self) {
        if self.torn_down {
            return;
        }
        let now = self.clock.now();
        loop {
            let due = self.scheduler.take_due(now);
            if due.is_empty() {
                break;
            }
            for fired in &due {
                if let Some(action) = self.gestures.on_timer(&mut self.scheduler, fired) {
                    self.apply_gesture(action);
                } else if !self.hud.on_timer(fired) {
                    self.bursts.on_timer(fired);
                }
            }
        }
        if let Some(event) = self.playback.poll() {
            self.on_playback_event(event);
        }
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    pub fn on_pointer_down(&mut self, item: usize, position: Point) {
        if self.torn_down || self.items.is_empty() || item != self.active_index() {
            log::trace!("pointer down on inactive item {item} ignored");
            return;
        }
        if self.is_gated(item) {
            return;
        }
        let now = self.clock.now();
        let playing = self.playback.is_playing(item);
        self.gestures
            .on_down(&mut self.scheduler, now, item, position, playing);
    }

    pub fn on_pointer_move(&mut self, position: Point) {
        if self.torn_down {
            return;
        }
        self.gestures.on_move(&mut self.scheduler, position);
    }

    pub fn on_pointer_up(&mut self, position: Point) {
        if self.torn_down {
            return;
        }
        let now = self.clock.now();
        if let Some(action) = self.gestures.on_up(&mut self.scheduler, now, position) {
            self.apply_gesture(action);
        }
    }

    pub fn on_pointer_cancel(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(action) = self.gestures.on_cancel(&mut self.scheduler) {
            self.apply_gesture(action);
        }
    }

    // ========================================================================
    // Keyboard input
    // ========================================================================

    /// Handles a DOM-style key. Returns `true` if the key was consumed.
    /// Suppressed while an overlay is open or the feed is empty.
    pub fn on_key(&mut self, key: &str) -> bool {
        if self.torn_down || self.overlay.is_some() || self.items.is_empty() {
            return false;
        }
        let Some(command) = KeyCommand::from_key(key) else {
            return false;
        };
        self.run_command(command);
        true
    }

    pub fn run_command(&mut self, command: KeyCommand) {
        if self.torn_down || self.items.is_empty() {
            return;
        }
        let active = self.active_index();
        match command {
            KeyCommand::Next => self.scroll_to_index(active + 1),
            KeyCommand::Previous => self.scroll_to_index(active.saturating_sub(1)),
            KeyCommand::TogglePause => self.toggle_pause(),
            KeyCommand::ToggleMute => self.toggle_mute(),
            KeyCommand::Like => {
                self.toggle_like(active);
            }
        }
    }

    // ========================================================================
    // Intents
    // ========================================================================

    /// Moves the active index directly. Out-of-range values are clamped.
    pub fn set_active_index(&mut self, index: usize) {
        if self.torn_down {
            return;
        }
        if let Some(index) = self.resolver.force(index, self.items.len()) {
            self.on_active_changed(index);
        }
    }

    /// Moves the active index and asks the host to scroll there.
    pub fn scroll_to_index(&mut self, index: usize) {
        if self.torn_down {
            return;
        }
        if let Some(index) = self.resolver.force(index, self.items.len()) {
            self.events.push(FeedEvent::ScrollToRequested { index });
            self.on_active_changed(index);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.torn_down || self.paused == paused {
            return;
        }
        self.paused = paused;
        log::debug!("paused = {paused}");
        self.events.push(FeedEvent::PauseToggled { paused });
        self.sync_playback();
        self.show_hud();
    }

    pub fn toggle_mute(&mut self) {
        if self.torn_down {
            return;
        }
        self.muted = !self.muted;
        log::debug!("muted = {}", self.muted);
        self.events.push(FeedEvent::MuteToggled { muted: self.muted });
        self.sync_playback();
        self.show_hud();
    }

    /// Flips `liked` for the item. Returns the new value.
    pub fn toggle_like(&mut self, index: usize) -> Option<bool> {
        if self.torn_down {
            return None;
        }
        let id = self.items.get(index)?.id.clone();
        let liked = self.engagement.toggle_like(&id);
        self.events.push(FeedEvent::LikeToggled { id, liked });
        self.show_hud();
        Some(liked)
    }

    /// Forces `liked`. Emits only when the value changed.
    pub fn set_liked(&mut self, index: usize, liked: bool) {
        if self.torn_down {
            return;
        }
        let Some(item) = self.items.get(index) else {
            return;
        };
        let id = item.id.clone();
        if self.engagement.set_liked(&id, liked) {
            self.events.push(FeedEvent::LikeToggled { id, liked });
        }
    }

    pub fn toggle_save(&mut self, index: usize) -> Option<bool> {
        if self.torn_down {
            return None;
        }
        let id = self.items.get(index)?.id.clone();
        let saved = self.engagement.toggle_save(&id);
        self.events.push(FeedEvent::SaveToggled { id, saved });
        self.show_hud();
        Some(saved)
    }

    pub fn toggle_follow(&mut self, index: usize) -> Option<bool> {
        if self.torn_down {
            return None;
        }
        let id = self.items.get(index)?.id.clone();
        let following = self.engagement.toggle_follow(&id);
        self.events.push(FeedEvent::FollowToggled { id, following });
        self.show_hud();
        Some(following)
    }

    /// "Show anyway" for a gated item. Affects this session's display only.
    pub fn reveal_item(&mut self, index: usize) {
        if self.torn_down {
            return;
        }
        let Some(item) = self.items.get(index) else {
            return;
        };
        if self.gate.reveal(&item.id) {
            log::debug!("item {index} revealed for this session");
            if index == self.active_index() {
                self.sync_playback();
                self.show_hud();
            }
        }
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Replaces the settings. Gating is re-evaluated immediately; the
    /// current mute state is kept.
    pub fn set_settings(&mut self, settings: FeedSettings) {
        self.settings = settings;
        if !self.torn_down {
            self.sync_playback();
        }
    }

    /// Opens a modal overlay. Returns `false` if one is already open, the
    /// item does not exist or the feed was torn down.
    pub fn open_overlay(&mut self, kind: OverlayKind, index: usize) -> bool {
        if self.torn_down || self.overlay.is_some() {
            return false;
        }
        let event = match kind {
            OverlayKind::Filters => FeedEvent::FiltersRequested,
            _ => {
                let Some(item) = self.items.get(index) else {
                    return false;
                };
                let id = item.id.clone();
                match kind {
                    OverlayKind::Comments => FeedEvent::CommentsRequested { id },
                    OverlayKind::Share => FeedEvent::ShareRequested { id },
                    _ => FeedEvent::OptionsRequested { id },
                }
            }
        };
        self.overlay = Some(kind);
        self.events.push(event);
        true
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<OverlayKind> {
        self.overlay
    }

    /// Shares `url` for the item through the host's capabilities, degrading
    /// to the in-app sheet. The share title is the linked entity's label,
    /// or the author handle for items without one.
    pub fn share_item(&self, index: usize, url: &str, sink: &mut dyn ShareSink) -> ShareOutcome {
        let title = self
            .items
            .get(index)
            .map(FeedItem::share_title)
            .unwrap_or_default();
        share_link(sink, title, url)
    }

    // ========================================================================
    // State queries
    // ========================================================================

    pub fn active_index(&self) -> usize {
        self.resolver.active()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_hud_visible(&self) -> bool {
        self.hud.is_visible()
    }

    pub fn playback_state(&self, index: usize) -> Option<PlaybackState> {
        self.playback.state(index)
    }

    pub fn playing_count(&self) -> usize {
        self.playback.playing_count()
    }

    pub fn engagement(&self, index: usize) -> Engagement {
        self.items
            .get(index)
            .map(|item| self.engagement.get(&item.id))
            .unwrap_or_default()
    }

    pub fn bursts(&self) -> &[LikeBurst] {
        self.bursts.bursts()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Active item's playback progress in `[0, 1]`.
    pub fn progress(&self) -> Option<f32> {
        let handle = self.playback.handle(self.active_index())?;
        progress_fraction(handle.position(), handle.duration())
    }

    pub fn is_gated(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| self.gate.is_gated(item, &self.settings))
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let active_index = (!self.items.is_empty()).then(|| self.active_index());
        FeedSnapshot {
            active_index,
            paused: self.paused,
            muted: self.muted,
            hud_visible: self.hud.is_visible(),
            scroll_hint_visible: !self.resolver.has_scrolled(),
            active_gated: active_index.is_some_and(|index| self.is_gated(index)),
            overlay: self.overlay,
            bursts: self.bursts.bursts().to_vec(),
            progress: self.progress(),
            engagement: self
                .items
                .iter()
                .map(|item| (item.id.clone(), self.engagement.get(&item.id)))
                .collect(),
        }
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<FeedEvent> {
        self.events.take()
    }

    pub fn peek_events(&self) -> &[FeedEvent] {
        self.events.peek()
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Cancels every timer, abandons the outstanding play request and pauses
    /// every handle. Further input is ignored. Also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        log::debug!("feed teardown");
        self.torn_down = true;
        self.gestures.reset(&mut self.scheduler);
        self.hud.cancel(&mut self.scheduler);
        self.bursts.clear(&mut self.scheduler);
        self.scheduler.clear();
        self.resolver.cancel_pending();
        self.playback.stop_all();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn on_active_changed(&mut self, index: usize) {
        // A held press on the previous item must not leave playback paused.
        if let Some(GestureAction::HoldRelease { item }) =
            self.gestures.on_cancel(&mut self.scheduler)
        {
            log::debug!("hold on {item} interrupted by item change");
            self.set_paused(false);
        }
        self.gestures.forget_taps(&mut self.scheduler);
        self.events.push(FeedEvent::ActiveItemChanged { index });
        self.sync_playback();
        self.show_hud();
        self.maybe_request_more();
    }

    fn apply_gesture(&mut self, action: GestureAction) {
        let active = self.active_index();
        match action {
            GestureAction::HoldPause { item } if item == active => self.set_paused(true),
            GestureAction::HoldRelease { item } if item == active => self.set_paused(false),
            GestureAction::SingleTap { item } if item == active => self.toggle_pause(),
            GestureAction::DoubleTap { item, at } => {
                self.set_liked(item, true);
                let now = self.clock.now();
                let animated = !self.settings.reduced_motion;
                self.bursts.spawn(&mut self.scheduler, now, at, animated);
            }
            other => log::trace!("gesture {:?} no longer targets the active item", other),
        }
    }

    fn playback_target(&self) -> Option<usize> {
        if self.paused || self.items.is_empty() {
            return None;
        }
        let active = self.active_index();
        (!self.is_gated(active)).then_some(active)
    }

    fn sync_playback(&mut self) {
        if self.torn_down {
            return;
        }
        let target = self.playback_target();
        if let Some(event) = self.playback.sync(target, self.muted) {
            self.on_playback_event(event);
        }
    }

    fn on_playback_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Started { .. } => {
                // Playback began after the HUD was raised: start the countdown.
                if self.hud.is_visible() && !self.hud.is_counting_down() {
                    self.show_hud();
                }
            }
            PlaybackEvent::Rejected { index, .. } => {
                self.paused = true;
                self.events.push(FeedEvent::PlaybackBlocked { index });
                self.sync_playback();
                self.show_hud();
            }
        }
    }

    fn active_is_playing(&self) -> bool {
        !self.items.is_empty() && self.playback.is_playing(self.active_index())
    }

    /// Raises the HUD and restarts its countdown if the active item plays.
    fn show_hud(&mut self) {
        if self.torn_down {
            return;
        }
        let now = self.clock.now();
        let playing = self.active_is_playing();
        self.hud.show(&mut self.scheduler, now, playing);
    }

    fn maybe_request_more(&mut self) {
        let loaded = self.items.len();
        if loaded == 0 || self.load_more_requested_for == Some(loaded) {
            return;
        }
        if self.active_index() + self.config.load_more_threshold >= loaded {
            self.load_more_requested_for = Some(loaded);
            self.events.push(FeedEvent::LoadMoreRequested { loaded });
        }
    }
}

impl<C: FrameClock> Drop for FeedController<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
