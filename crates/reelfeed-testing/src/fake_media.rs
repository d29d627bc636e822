//! Scriptable in-memory [`MediaHandle`].
//!
//! Clones share the same state, so a test keeps one clone to inspect and
//! script while the controller owns the boxed other.

use reelfeed_core::{MediaError, MediaHandle, PlayError, PlayRequest};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

/// How the next `play()` call resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayScript {
    /// Resolves successfully on first poll.
    Resolve,
    /// Rejects on first poll, e.g. blocked by autoplay policy.
    Reject(PlayError),
    /// Stays pending until [`FakeMedia::resolve_play`] is called.
    Defer,
}

/// One call the controller made on the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaCall {
    Play,
    Pause,
    SetMuted(bool),
}

type DeferredSlot = Rc<RefCell<Option<Result<(), PlayError>>>>;

#[derive(Debug)]
struct FakeMediaState {
    script: PlayScript,
    /// The element itself is running, as opposed to the coordinator's view.
    element_playing: bool,
    muted: Option<bool>,
    position: Duration,
    duration: Option<Duration>,
    deferred: Option<DeferredSlot>,
    calls: Vec<MediaCall>,
    fail_pause: bool,
}

#[derive(Clone, Debug)]
pub struct FakeMedia {
    state: Rc<RefCell<FakeMediaState>>,
}

impl Default for FakeMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeMedia {
    pub fn new() -> Self {
        Self::with_script(PlayScript::Resolve)
    }

    pub fn with_script(script: PlayScript) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeMediaState {
                script,
                element_playing: false,
                muted: None,
                position: Duration::ZERO,
                duration: Some(Duration::from_secs(15)),
                deferred: None,
                calls: Vec::new(),
                fail_pause: false,
            })),
        }
    }

    /// Boxed clone for [`reelfeed_core::FeedController::append_items`].
    pub fn boxed(&self) -> Box<dyn MediaHandle> {
        Box::new(self.clone())
    }

    pub fn set_script(&self, script: PlayScript) {
        self.state.borrow_mut().script = script;
    }

    /// Makes `pause()` report an error (the element is still stopped).
    pub fn set_fail_pause(&self, fail: bool) {
        self.state.borrow_mut().fail_pause = fail;
    }

    pub fn set_position(&self, position: Duration) {
        self.state.borrow_mut().position = position;
    }

    pub fn set_duration(&self, duration: Option<Duration>) {
        self.state.borrow_mut().duration = duration;
    }

    /// Settles the outstanding deferred play request. Returns `false` if
    /// there was none, e.g. because a pause aborted it.
    pub fn resolve_play(&self, result: Result<(), PlayError>) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(slot) = state.deferred.take() else {
            return false;
        };
        if result.is_ok() {
            state.element_playing = true;
        }
        *slot.borrow_mut() = Some(result);
        true
    }

    pub fn has_deferred_play(&self) -> bool {
        self.state.borrow().deferred.is_some()
    }

    pub fn is_element_playing(&self) -> bool {
        self.state.borrow().element_playing
    }

    /// Last mute flag applied, `None` if never set.
    pub fn muted(&self) -> Option<bool> {
        self.state.borrow().muted
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.state.borrow().calls.clone()
    }

    pub fn play_calls(&self) -> usize {
        self.count(MediaCall::Play)
    }

    pub fn pause_calls(&self) -> usize {
        self.count(MediaCall::Pause)
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn count(&self, call: MediaCall) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|recorded| **recorded == call)
            .count()
    }
}

impl MediaHandle for FakeMedia {
    fn play(&mut self) -> PlayRequest {
        let mut state = self.state.borrow_mut();
        state.calls.push(MediaCall::Play);
        match state.script.clone() {
            PlayScript::Resolve => {
                state.element_playing = true;
                Box::pin(std::future::ready(Ok(())))
            }
            PlayScript::Reject(error) => Box::pin(std::future::ready(Err(error))),
            PlayScript::Defer => {
                let slot: DeferredSlot = Rc::new(RefCell::new(None));
                state.deferred = Some(slot.clone());
                Box::pin(DeferredPlay { slot })
            }
        }
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MediaCall::Pause);
        state.element_playing = false;
        // Pausing aborts an in-flight play request.
        state.deferred = None;
        if state.fail_pause {
            return Err(MediaError::Failed("pause refused".into()));
        }
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), MediaError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MediaCall::SetMuted(muted));
        state.muted = Some(muted);
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.borrow().duration
    }
}

struct DeferredPlay {
    slot: DeferredSlot,
}

impl Future for DeferredPlay {
    type Output = Result<(), PlayError>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.slot.borrow_mut().take() {
            Some(result) => Poll::Ready(result),
            None => Poll::Pending,
        }
    }
}
