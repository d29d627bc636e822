use super::*;
use crate::error::MediaError;
use std::cell::RefCell;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

#[derive(Default)]
struct Probe {
    plays: usize,
    pauses: usize,
    muted: Option<bool>,
    outcome: Option<Result<(), PlayError>>,
    gate: Option<Rc<RefCell<Option<Result<(), PlayError>>>>>,
}

/// Handle whose play result is either immediate or released by the test.
struct TestHandle {
    probe: Rc<RefCell<Probe>>,
    deferred: bool,
}

struct Gated(Rc<RefCell<Option<Result<(), PlayError>>>>);

impl Future for Gated {
    type Output = Result<(), PlayError>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.0.borrow_mut().take() {
            Some(result) => Poll::Ready(result),
            None => Poll::Pending,
        }
    }
}

impl MediaHandle for TestHandle {
    fn play(&mut self) -> PlayRequest {
        let mut probe = self.probe.borrow_mut();
        probe.plays += 1;
        if self.deferred {
            let slot = Rc::new(RefCell::new(None));
            probe.gate = Some(slot.clone());
            return Box::pin(Gated(slot));
        }
        let outcome = probe.outcome.clone().unwrap_or(Ok(()));
        Box::pin(std::future::ready(outcome))
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.probe.borrow_mut().pauses += 1;
        Err(MediaError::Detached)
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), MediaError> {
        self.probe.borrow_mut().muted = Some(muted);
        Ok(())
    }

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn duration(&self) -> Option<Duration> {
        None
    }
}

fn coordinator(count: usize, muted: bool) -> (PlaybackCoordinator, Vec<Rc<RefCell<Probe>>>) {
    let mut coordinator = PlaybackCoordinator::new(muted);
    let mut probes = Vec::new();
    for _ in 0..count {
        let probe = Rc::new(RefCell::new(Probe::default()));
        coordinator.push(Box::new(TestHandle {
            probe: probe.clone(),
            deferred: false,
        }));
        probes.push(probe);
    }
    (coordinator, probes)
}

#[test]
fn target_plays_and_others_pause() {
    let (mut coordinator, probes) = coordinator(3, true);
    assert_eq!(
        coordinator.sync(Some(1), true),
        Some(PlaybackEvent::Started { index: 1 })
    );
    assert_eq!(coordinator.states(), &[
        PlaybackState::Idle,
        PlaybackState::Playing,
        PlaybackState::Idle
    ]);
    assert_eq!(probes[0].borrow().pauses, 1);
    assert_eq!(probes[1].borrow().pauses, 0);
    assert_eq!(probes[2].borrow().pauses, 1);
}

#[test]
fn at_most_one_playing_across_switches() {
    let (mut coordinator, _probes) = coordinator(5, true);
    for target in [0, 3, 1, 4, 4, 2, 0] {
        coordinator.sync(Some(target), true);
        assert_eq!(coordinator.playing_count(), 1);
        assert!(coordinator.is_playing(target));
    }
    coordinator.sync(None, true);
    assert_eq!(coordinator.playing_count(), 0);
}

#[test]
fn playing_target_is_not_asked_again() {
    let (mut coordinator, probes) = coordinator(2, true);
    coordinator.sync(Some(0), true);
    assert_eq!(coordinator.sync(Some(0), false), None);
    assert_eq!(probes[0].borrow().plays, 1);
}

#[test]
fn mute_reaches_inactive_handles() {
    let (mut coordinator, probes) = coordinator(3, true);
    for probe in &probes {
        assert_eq!(probe.borrow().muted, Some(true));
    }
    coordinator.sync(Some(0), false);
    for probe in &probes {
        assert_eq!(probe.borrow().muted, Some(false));
    }
}

#[test]
fn rejection_is_reported_once() {
    let (mut coordinator, probes) = coordinator(2, true);
    probes[0].borrow_mut().outcome = Some(Err(PlayError::Blocked));

    let event = coordinator.sync(Some(0), true);
    assert_eq!(
        event,
        Some(PlaybackEvent::Rejected {
            index: 0,
            error: PlayError::Blocked
        })
    );
    assert_eq!(coordinator.state(0), Some(PlaybackState::PlayRejected));
    assert_eq!(coordinator.poll(), None);

    // Pausing leaves the rejected marker alone.
    coordinator.sync(None, true);
    assert_eq!(coordinator.state(0), Some(PlaybackState::PlayRejected));
}

#[test]
fn pending_play_is_dropped_when_target_moves() {
    let mut coordinator = PlaybackCoordinator::new(true);
    let slow = Rc::new(RefCell::new(Probe::default()));
    coordinator.push(Box::new(TestHandle {
        probe: slow.clone(),
        deferred: true,
    }));
    let fast = Rc::new(RefCell::new(Probe::default()));
    coordinator.push(Box::new(TestHandle {
        probe: fast.clone(),
        deferred: false,
    }));

    assert_eq!(coordinator.sync(Some(0), true), None);
    assert!(coordinator.has_pending_play());

    // Resolving late must not mark the old item playing.
    let gate = slow.borrow_mut().gate.take().unwrap();
    assert_eq!(
        coordinator.sync(Some(1), true),
        Some(PlaybackEvent::Started { index: 1 })
    );
    *gate.borrow_mut() = Some(Ok(()));
    assert_eq!(coordinator.poll(), None);
    assert_eq!(coordinator.state(0), Some(PlaybackState::Idle));
    assert_eq!(coordinator.playing_count(), 1);
}

#[test]
fn pending_play_resolves_on_poll() {
    let mut coordinator = PlaybackCoordinator::new(false);
    let probe = Rc::new(RefCell::new(Probe::default()));
    coordinator.push(Box::new(TestHandle {
        probe: probe.clone(),
        deferred: true,
    }));

    coordinator.sync(Some(0), false);
    assert_eq!(coordinator.poll(), None);
    // A repeated sync does not stack a second request.
    coordinator.sync(Some(0), false);
    assert_eq!(probe.borrow().plays, 1);

    let gate = probe.borrow_mut().gate.take().unwrap();
    *gate.borrow_mut() = Some(Ok(()));
    assert_eq!(coordinator.poll(), Some(PlaybackEvent::Started { index: 0 }));
    assert!(coordinator.is_playing(0));
}

#[test]
fn out_of_range_target_is_treated_as_none() {
    let (mut coordinator, _probes) = coordinator(2, true);
    assert_eq!(coordinator.sync(Some(7), true), None);
    assert_eq!(coordinator.target(), None);
}

#[test]
fn stop_all_pauses_everything() {
    let (mut coordinator, probes) = coordinator(2, true);
    coordinator.sync(Some(1), true);
    coordinator.stop_all();
    assert_eq!(coordinator.playing_count(), 0);
    assert_eq!(coordinator.state(1), Some(PlaybackState::Paused));
    assert_eq!(probes[1].borrow().pauses, 1);
}
