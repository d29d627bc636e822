//! Sharing with graceful degradation.
//!
//! Native share sheet first, clipboard second, and finally the host's own
//! in-app sheet. Capability failures are logged and never propagated.

use crate::error::ShareError;

/// Platform share capabilities provided by the host.
pub trait ShareSink {
    fn native_share(&mut self, title: &str, url: &str) -> Result<(), ShareError>;
    fn copy_link(&mut self, url: &str) -> Result<(), ShareError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// The user dismissed the native sheet; nothing else is attempted.
    Dismissed,
    /// Neither capability worked; the host should show its own sheet.
    Fallback,
}

pub fn share_link(sink: &mut dyn ShareSink, title: &str, url: &str) -> ShareOutcome {
    match sink.native_share(title, url) {
        Ok(()) => return ShareOutcome::Shared,
        Err(ShareError::Denied) => {
            log::debug!("native share dismissed for {url}");
            return ShareOutcome::Dismissed;
        }
        Err(err) => log::warn!("native share unavailable: {err}"),
    }
    match sink.copy_link(url) {
        Ok(()) => ShareOutcome::Copied,
        Err(err) => {
            log::warn!("clipboard unavailable, falling back to in-app sheet: {err}");
            ShareOutcome::Fallback
        }
    }
}
