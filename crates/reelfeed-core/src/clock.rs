//! Time sources for the engine.
//!
//! All engine timestamps are offsets from the clock's origin. The host drives
//! the engine once per display frame, so timers are only as precise as the
//! frame cadence.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
// Use web-time for cross-platform time support (native + WASM)
use web_time::Instant;

/// Monotonic time source.
pub trait FrameClock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `web_time::Instant`.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced explicitly by the caller. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
