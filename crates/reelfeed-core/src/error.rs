use thiserror::Error;

/// Outcome of a rejected `play()` request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("playback blocked by autoplay policy")]
    Blocked,
    #[error("media failed to start: {0}")]
    Failed(String),
}

/// Failure of a best-effort media command (pause, mute).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("media element detached")]
    Detached,
    #[error("media command failed: {0}")]
    Failed(String),
}

/// Failure of a share or clipboard capability.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("capability not available on this platform")]
    Unavailable,
    #[error("request denied by the user or platform")]
    Denied,
    #[error("share failed: {0}")]
    Failed(String),
}
