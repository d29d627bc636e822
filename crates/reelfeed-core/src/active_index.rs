//! Scroll offset to active item resolution.
//!
//! # Frame coalescing
//! Raw scroll events can arrive many times per frame during a flick. The
//! resolver only records the latest offset and raises a pending flag; the
//! actual resolution runs once in [`ActiveIndexResolver::resolve_frame`],
//! which the host calls from its frame callback. While a resolution is
//! pending, further events do not schedule another one.

/// Maps a scroll offset to the index of the most visible item:
/// `clamp(round(offset / height), 0, count - 1)`.
///
/// Returns `None` for an empty list. A non-positive `height` is treated as
/// unmeasured and must be replaced by the caller's fallback beforehand.
pub fn resolve_index(offset: f32, height: f32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    if !offset.is_finite() || height <= 0.0 || !height.is_finite() {
        return Some(0);
    }
    let raw = (offset / height).round();
    if raw <= 0.0 {
        Some(0)
    } else if raw >= last as f32 {
        Some(last)
    } else {
        Some(raw as usize)
    }
}

/// Result of one per-frame resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameResolution {
    /// New active index, only when it differs from the previous one.
    pub changed_to: Option<usize>,
    /// Set once, on the first resolution past the hint distance.
    pub scroll_started: bool,
}

#[derive(Clone, Debug)]
pub struct ActiveIndexResolver {
    active: usize,
    latest_offset: f32,
    frame_pending: bool,
    scroll_started: bool,
    hint_distance: f32,
}

impl ActiveIndexResolver {
    pub fn new(hint_distance: f32) -> Self {
        Self {
            active: 0,
            latest_offset: 0.0,
            frame_pending: false,
            scroll_started: false,
            hint_distance,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn has_scrolled(&self) -> bool {
        self.scroll_started
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Records a raw scroll sample. Returns `true` when this sample scheduled
    /// a new resolution, `false` when one was already pending.
    pub fn on_scroll(&mut self, offset: f32) -> bool {
        self.latest_offset = offset;
        if self.frame_pending {
            log::trace!("scroll sample {offset} coalesced into pending frame");
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Runs the pending resolution, if any.
    pub fn resolve_frame(&mut self, height: f32, count: usize) -> FrameResolution {
        if !std::mem::take(&mut self.frame_pending) {
            return FrameResolution::default();
        }

        let mut resolution = FrameResolution::default();
        if !self.scroll_started && self.latest_offset > self.hint_distance {
            self.scroll_started = true;
            resolution.scroll_started = true;
        }

        if let Some(index) = resolve_index(self.latest_offset, height, count) {
            if index != self.active {
                log::debug!(
                    "active index {} -> {} (offset {}, height {})",
                    self.active,
                    index,
                    self.latest_offset,
                    height
                );
                self.active = index;
                resolution.changed_to = Some(index);
            }
        }
        resolution
    }

    /// Moves the cursor directly (keyboard, programmatic scroll). Returns
    /// the new index when it changed.
    pub fn force(&mut self, index: usize, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let index = index.min(count - 1);
        if index == self.active {
            return None;
        }
        self.active = index;
        Some(index)
    }

    /// Schedules a resolution of the last known offset, for example after
    /// the viewport was resized.
    pub fn request_resolution(&mut self) {
        self.frame_pending = true;
    }

    /// Drops a pending resolution without running it.
    pub fn cancel_pending(&mut self) {
        self.frame_pending = false;
    }
}
