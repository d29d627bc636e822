//! Playback coordination across all feed items.
//!
//! # Invariant
//! At most one handle is `Playing`. The coordinator receives a single
//! *target* (the active index, or `None` when globally paused or gated) and
//! on every change pauses every other handle synchronously before it asks
//! the target to play. An item is only marked `Playing` once its play
//! request resolves successfully *and* it is still the target.
//!
//! # Per-item states
//! ```text
//! Idle --play ok--> Playing <--> Paused
//!   \                   ^          /
//!    \--play rejected--> PlayRejected (acts like Paused, signals once)
//! ```
//!
//! Switching targets never seeks: a reactivated item resumes from wherever
//! its media element left off.

use crate::error::PlayError;
use crate::media::{MediaHandle, PlayRequest};
use futures_task::noop_waker_ref;
use std::fmt;
use std::future::Future;
use std::task::{Context, Poll};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    PlayRejected,
}

/// Outcome of the target's play request, reported once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    Started { index: usize },
    /// Autoplay blocked or failed; the item now acts as paused.
    Rejected { index: usize, error: PlayError },
}

struct PendingPlay {
    index: usize,
    request: PlayRequest,
}

pub struct PlaybackCoordinator {
    handles: Vec<Box<dyn MediaHandle>>,
    states: Vec<PlaybackState>,
    pending: Option<PendingPlay>,
    target: Option<usize>,
    muted: bool,
}

impl fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("states", &self.states)
            .field("pending", &self.pending.as_ref().map(|pending| pending.index))
            .field("target", &self.target)
            .field("muted", &self.muted)
            .finish()
    }
}

impl PlaybackCoordinator {
    pub fn new(muted: bool) -> Self {
        Self {
            handles: Vec::new(),
            states: Vec::new(),
            pending: None,
            target: None,
            muted,
        }
    }

    /// Registers the handle for the next item and applies the current mute
    /// flag to it. Returns the item's index.
    pub fn push(&mut self, mut handle: Box<dyn MediaHandle>) -> usize {
        if let Err(err) = handle.set_muted(self.muted) {
            log::debug!("initial mute on new handle failed: {err}");
        }
        self.handles.push(handle);
        self.states.push(PlaybackState::Idle);
        self.handles.len() - 1
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<PlaybackState> {
        self.states.get(index).copied()
    }

    pub fn states(&self) -> &[PlaybackState] {
        &self.states
    }

    pub fn playing_count(&self) -> usize {
        self.states
            .iter()
            .filter(|state| **state == PlaybackState::Playing)
            .count()
    }

    pub fn is_playing(&self, index: usize) -> bool {
        self.state(index) == Some(PlaybackState::Playing)
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn has_pending_play(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle(&self, index: usize) -> Option<&dyn MediaHandle> {
        self.handles.get(index).map(|handle| handle.as_ref())
    }

    /// Reconciles every handle with `target` and `muted`.
    pub fn sync(&mut self, target: Option<usize>, muted: bool) -> Option<PlaybackEvent> {
        let target = target.filter(|index| *index < self.handles.len());
        if self.target != target {
            log::debug!("playback target {:?} -> {:?}", self.target, target);
        }
        self.target = target;
        self.muted = muted;

        if let Some(pending) = &self.pending {
            if Some(pending.index) != target {
                log::trace!("dropping superseded play request for {}", pending.index);
                self.pending = None;
            }
        }

        for index in 0..self.handles.len() {
            let handle = &mut self.handles[index];
            if let Err(err) = handle.set_muted(muted) {
                log::trace!("set_muted({muted}) on {index} failed: {err}");
            }

            if Some(index) == target {
                continue;
            }
            if let Err(err) = handle.pause() {
                log::trace!("pause on {index} failed: {err}");
            }
            if self.states[index] == PlaybackState::Playing {
                self.states[index] = PlaybackState::Paused;
            }
        }

        if let Some(index) = target {
            let already_requested = self
                .pending
                .as_ref()
                .is_some_and(|pending| pending.index == index);
            if self.states[index] != PlaybackState::Playing && !already_requested {
                log::trace!("requesting play on {index}");
                let request = self.handles[index].play();
                self.pending = Some(PendingPlay { index, request });
            }
        }

        self.poll()
    }

    /// Polls the outstanding play request without blocking.
    pub fn poll(&mut self) -> Option<PlaybackEvent> {
        let mut pending = self.pending.take()?;
        let mut cx = Context::from_waker(noop_waker_ref());
        let outcome = match pending.request.as_mut().poll(&mut cx) {
            Poll::Pending => {
                self.pending = Some(pending);
                return None;
            }
            Poll::Ready(outcome) => outcome,
        };

        // Superseded requests are dropped in `sync`, so a resolved request
        // always belongs to the current target.
        let index = pending.index;
        match outcome {
            Ok(()) => {
                log::debug!("item {index} playing");
                self.states[index] = PlaybackState::Playing;
                Some(PlaybackEvent::Started { index })
            }
            Err(error) => {
                log::warn!("play rejected for item {index}: {error}");
                self.states[index] = PlaybackState::PlayRejected;
                Some(PlaybackEvent::Rejected { index, error })
            }
        }
    }

    /// Pauses everything and abandons the outstanding request.
    pub fn stop_all(&mut self) {
        self.pending = None;
        self.target = None;
        for (index, handle) in self.handles.iter_mut().enumerate() {
            if let Err(err) = handle.pause() {
                log::trace!("pause on {index} failed: {err}");
            }
            if self.states[index] == PlaybackState::Playing {
                self.states[index] = PlaybackState::Paused;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/playback_tests.rs"]
mod tests;
