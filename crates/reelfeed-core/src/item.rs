//! Feed item data as delivered by the external data source.
//!
//! Items are immutable once loaded. The engine reads their identity and
//! content flags but never mutates them; engagement lives in
//! [`EngagementStore`](crate::engagement::EngagementStore).

use std::fmt;

/// Stable identity of a feed item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Opaque reference to the item's media source. Resolved by the host into a
/// [`MediaHandle`](crate::media::MediaHandle).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaRef(pub String);

/// Reference to the item's author.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuthorRef {
    pub id: String,
    pub handle: String,
}

/// Optional entity the item is linked to (for example a title).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkedEntity {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemStats {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// Content flags attached by the data source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContentFlags {
    pub spoiler: bool,
    pub mature: bool,
    pub sponsored: bool,
}

/// One unit of media content in the vertical list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeedItem {
    pub id: ItemId,
    pub media: MediaRef,
    pub author: AuthorRef,
    pub stats: ItemStats,
    pub flags: ContentFlags,
    pub linked: Option<LinkedEntity>,
}

impl FeedItem {
    /// Creates an item with default stats and no flags.
    pub fn new(id: impl Into<String>, media: impl Into<String>, author: impl Into<String>) -> Self {
        let author = author.into();
        Self {
            id: ItemId::new(id),
            media: MediaRef(media.into()),
            author: AuthorRef {
                id: author.clone(),
                handle: format!("@{author}"),
            },
            stats: ItemStats::default(),
            flags: ContentFlags::default(),
            linked: None,
        }
    }

    pub fn with_flags(mut self, flags: ContentFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_stats(mut self, stats: ItemStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_linked(mut self, linked: LinkedEntity) -> Self {
        self.linked = Some(linked);
        self
    }

    /// Marks the item as a spoiler.
    pub fn spoiler(mut self) -> Self {
        self.flags.spoiler = true;
        self
    }

    /// Title used when sharing: the linked entity's label if any, otherwise
    /// the author handle.
    pub fn share_title(&self) -> &str {
        self.linked
            .as_ref()
            .map_or(self.author.handle.as_str(), |linked| linked.label.as_str())
    }
}
