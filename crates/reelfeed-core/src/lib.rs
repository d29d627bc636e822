//! Interaction engine for a vertical, full-screen, snap-scrolling media feed.
//!
//! The engine maps scroll position to a single active item, keeps exactly
//! that item playing, classifies taps, double taps and holds on it, and
//! drives the transient HUD and like-burst feedback. It renders nothing:
//! hosts feed it input through [`FeedController`] and read back a
//! [`FeedSnapshot`] plus a stream of [`FeedEvent`]s.

pub mod active_index;
pub mod clock;
pub mod content_gate;
pub mod controller;
pub mod engagement;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod hud;
pub mod item;
pub mod keyboard;
pub mod like_burst;
pub mod media;
pub mod playback;
pub mod scheduler;
pub mod settings;
pub mod share;
pub mod viewport;

// Re-export commonly used items
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use controller::{FeedController, FeedSnapshot};
pub use engagement::Engagement;
pub use error::{MediaError, PlayError, ShareError};
pub use events::{FeedEvent, OverlayKind};
pub use geometry::Point;
pub use item::{AuthorRef, ContentFlags, FeedItem, ItemId, ItemStats, LinkedEntity, MediaRef};
pub use keyboard::KeyCommand;
pub use like_burst::{BurstKey, LikeBurst};
pub use media::{ready_play, MediaHandle, PlayRequest};
pub use playback::PlaybackState;
pub use settings::{FeedConfig, FeedSettings};
pub use share::{ShareOutcome, ShareSink};

pub mod prelude {
    pub use crate::clock::{FrameClock, ManualClock, SystemClock};
    pub use crate::controller::{FeedController, FeedSnapshot};
    pub use crate::error::{MediaError, PlayError, ShareError};
    pub use crate::events::{FeedEvent, OverlayKind};
    pub use crate::geometry::Point;
    pub use crate::item::{ContentFlags, FeedItem, ItemId};
    pub use crate::media::{ready_play, MediaHandle, PlayRequest};
    pub use crate::playback::PlaybackState;
    pub use crate::settings::{FeedConfig, FeedSettings};
    pub use crate::share::{ShareOutcome, ShareSink};
}
