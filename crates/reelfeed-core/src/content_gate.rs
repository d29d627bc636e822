//! Spoiler gating of item media.

use crate::item::{FeedItem, ItemId};
use crate::settings::FeedSettings;
use rustc_hash::FxHashSet;

/// Whether `item`'s media should be hidden under `settings`.
///
/// Pure: depends only on its arguments.
pub fn is_hidden(item: &FeedItem, settings: &FeedSettings) -> bool {
    item.flags.spoiler && settings.hide_spoilers
}

/// Session-scoped "show anyway" overrides on top of [`is_hidden`].
///
/// Revealing an item never touches the stored filter setting.
#[derive(Clone, Debug, Default)]
pub struct ContentGate {
    revealed: FxHashSet<ItemId>,
}

impl ContentGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hidden and not revealed in this session.
    pub fn is_gated(&self, item: &FeedItem, settings: &FeedSettings) -> bool {
        is_hidden(item, settings) && !self.revealed.contains(&item.id)
    }

    /// Returns `true` if the item was not revealed before.
    pub fn reveal(&mut self, id: &ItemId) -> bool {
        self.revealed.insert(id.clone())
    }

    pub fn is_revealed(&self, id: &ItemId) -> bool {
        self.revealed.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_only_when_flagged_and_filtered() {
        let spoiler = FeedItem::new("a", "a.mp4", "ann").spoiler();
        let plain = FeedItem::new("b", "b.mp4", "bob");
        let hide = FeedSettings::default().with_hide_spoilers(true);
        let show = FeedSettings::default().with_hide_spoilers(false);

        assert!(is_hidden(&spoiler, &hide));
        assert!(!is_hidden(&spoiler, &show));
        assert!(!is_hidden(&plain, &hide));
        assert!(!is_hidden(&plain, &show));
        // Same inputs, same answer.
        assert_eq!(is_hidden(&spoiler, &hide), is_hidden(&spoiler.clone(), &hide));
    }

    #[test]
    fn reveal_lifts_gate_for_session_only() {
        let spoiler = FeedItem::new("a", "a.mp4", "ann").spoiler();
        let settings = FeedSettings::default().with_hide_spoilers(true);
        let mut gate = ContentGate::new();

        assert!(gate.is_gated(&spoiler, &settings));
        assert!(gate.reveal(&spoiler.id));
        assert!(!gate.reveal(&spoiler.id));
        assert!(!gate.is_gated(&spoiler, &settings));
        assert!(is_hidden(&spoiler, &settings));
        assert!(settings.hide_spoilers);
    }
}
