//! Session-local liked/saved/following flags.
//!
//! Only explicit toggles mutate the store; nothing is derived, reset or
//! persisted. It lives as long as the feed session.

use crate::item::ItemId;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Engagement {
    pub liked: bool,
    pub saved: bool,
    pub following: bool,
}

#[derive(Clone, Debug, Default)]
pub struct EngagementStore {
    entries: FxHashMap<ItemId, Engagement>,
}

impl EngagementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for `id`; all false when the item was never touched.
    pub fn get(&self, id: &ItemId) -> Engagement {
        self.entries.get(id).copied().unwrap_or_default()
    }

    /// Flips `liked` and returns the new value.
    pub fn toggle_like(&mut self, id: &ItemId) -> bool {
        let entry = self.entry(id);
        entry.liked = !entry.liked;
        entry.liked
    }

    /// Forces `liked`. Returns `true` if the value changed.
    pub fn set_liked(&mut self, id: &ItemId, liked: bool) -> bool {
        let entry = self.entry(id);
        let changed = entry.liked != liked;
        entry.liked = liked;
        changed
    }

    pub fn toggle_save(&mut self, id: &ItemId) -> bool {
        let entry = self.entry(id);
        entry.saved = !entry.saved;
        entry.saved
    }

    pub fn toggle_follow(&mut self, id: &ItemId) -> bool {
        let entry = self.entry(id);
        entry.following = !entry.following;
        entry.following
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &Engagement)> {
        self.entries.iter()
    }

    fn entry(&mut self, id: &ItemId) -> &mut Engagement {
        self.entries.entry(id.clone()).or_default()
    }
}
