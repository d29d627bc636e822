//! Notifications from the engine to the surrounding application.

use crate::item::ItemId;

/// Modal overlays hosted by the application. While one is open, keyboard
/// shortcuts are suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Comments,
    Share,
    Filters,
    Options,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    ActiveItemChanged { index: usize },
    LikeToggled { id: ItemId, liked: bool },
    SaveToggled { id: ItemId, saved: bool },
    FollowToggled { id: ItemId, following: bool },
    PauseToggled { paused: bool },
    MuteToggled { muted: bool },
    CommentsRequested { id: ItemId },
    ShareRequested { id: ItemId },
    OptionsRequested { id: ItemId },
    FiltersRequested,
    /// First scroll past the hint distance; dismiss the onboarding hint.
    ScrollStarted,
    /// The host should scroll the list so `index` is in view.
    ScrollToRequested { index: usize },
    /// Play was rejected; the HUD is up so the user can start it manually.
    PlaybackBlocked { index: usize },
    /// The active item is near the end of the `loaded` items.
    LoadMoreRequested { loaded: usize },
}

/// Ordered buffer of pending [`FeedEvent`]s, drained by the host.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<FeedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FeedEvent) {
        log::trace!("event {:?}", event);
        self.events.push(event);
    }

    /// Returns the events recorded since the last call to [`take`](Self::take).
    pub fn peek(&self) -> &[FeedEvent] {
        &self.events
    }

    /// Drains the recorded events and returns them to the caller.
    pub fn take(&mut self) -> Vec<FeedEvent> {
        std::mem::take(&mut self.events)
    }
}
