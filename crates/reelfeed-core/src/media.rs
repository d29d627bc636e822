//! Media handle capability consumed by the playback coordinator.

use crate::error::{MediaError, PlayError};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Pending result of [`MediaHandle::play`].
///
/// The coordinator polls it once per frame; dropping it abandons the request.
pub type PlayRequest = Pin<Box<dyn Future<Output = Result<(), PlayError>>>>;

/// Control surface of one item's media element.
pub trait MediaHandle {
    /// Starts playback. May resolve later and may be rejected by autoplay
    /// policy.
    fn play(&mut self) -> PlayRequest;

    /// Pauses playback. Best effort.
    fn pause(&mut self) -> Result<(), MediaError>;

    /// Applies the mute flag. Best effort.
    fn set_muted(&mut self, muted: bool) -> Result<(), MediaError>;

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Total duration, if known yet.
    fn duration(&self) -> Option<Duration>;
}

/// Resolves immediately with `result`. Handy for handles whose play request
/// is synchronous.
pub fn ready_play(result: Result<(), PlayError>) -> PlayRequest {
    Box::pin(std::future::ready(result))
}

/// Fraction of `duration` covered by `position`, clamped to `[0, 1]`.
pub fn progress_fraction(position: Duration, duration: Option<Duration>) -> Option<f32> {
    let duration = duration?;
    if duration.is_zero() {
        return None;
    }
    Some((position.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0))
}
