//! Height of the visible scrolling region.

/// Tracks the measured viewport height, falling back to a default until the
/// first usable measurement arrives.
#[derive(Clone, Copy, Debug)]
pub struct ViewportTracker {
    measured: Option<f32>,
    fallback: f32,
}

impl ViewportTracker {
    pub fn new(fallback: f32) -> Self {
        Self {
            measured: None,
            fallback,
        }
    }

    /// Records a new measurement. Non-finite or non-positive heights (for
    /// example before first layout) are ignored. Returns `true` if the
    /// effective height changed.
    pub fn on_resize(&mut self, height: f32) -> bool {
        if !height.is_finite() || height <= 0.0 {
            log::trace!("ignoring unusable viewport height {height}");
            return false;
        }
        let previous = self.height();
        self.measured = Some(height);
        previous != height
    }

    /// Effective height: the last measurement or the fallback.
    pub fn height(&self) -> f32 {
        self.measured.unwrap_or(self.fallback)
    }

    pub fn is_measured(&self) -> bool {
        self.measured.is_some()
    }
}
