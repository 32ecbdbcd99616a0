// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-thread request serialization.
//!
//! ## Overview
//!
//! [`EventSerializer`] owns a [`Presenter`] and the receiving end of an
//! unbounded FIFO channel. Any thread may hold a [`PresenterHandle`] and send
//! requests; they are applied one at a time, in arrival order, by whoever drives
//! the serializer:
//!
//! - the UI-bound context calls [`pump`](EventSerializer::pump) once per frame, or
//! - a dedicated thread calls [`run`](EventSerializer::run), which sleeps until
//!   the next message or timer deadline.
//!
//! A show that arrives while a hide is still animating is not queued behind it;
//! the state machine re-enters the entrance instead.
//!
//! Requires the `std` feature.

use core::time::Duration;
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use kurbo::Size;

use crate::host::{HostingStrategy, Presenter};
use crate::machine::{Event, Request};
use crate::types::{AnimationId, Completion};

/// The serializer that owned the channel is gone.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("presentation actor has shut down")]
pub struct Closed;

/// Monotonic time source for [`EventSerializer::run`].
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by [`Instant`].
#[derive(Copy, Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// A clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Sending side of an [`EventSerializer`]. Cheap to clone.
pub struct PresenterHandle<T> {
    tx: Sender<Event<T>>,
}

impl<T> Clone for PresenterHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> core::fmt::Debug for PresenterHandle<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PresenterHandle")
            .field("queued", &self.tx.len())
            .finish_non_exhaustive()
    }
}

impl<T> PresenterHandle<T> {
    /// Queue any event.
    pub fn send(&self, event: Event<T>) -> Result<(), Closed> {
        self.tx.send(event).map_err(|_| Closed)
    }

    /// Queue a show or hide request.
    pub fn present(&self, request: Request<T>) -> Result<(), Closed> {
        self.send(Event::Present(request))
    }

    /// Queue a content measurement.
    pub fn content_measured(&self, size: Size) -> Result<(), Closed> {
        self.send(Event::ContentMeasured(size))
    }

    /// Queue an animation completion.
    pub fn animation_finished(&self, id: AnimationId, completion: Completion) -> Result<(), Closed> {
        self.send(Event::AnimationFinished(id, completion))
    }
}

/// Single consumer that applies queued events to a [`Presenter`] in order.
pub struct EventSerializer<T, H> {
    presenter: Presenter<T, H>,
    tx: Sender<Event<T>>,
    rx: Receiver<Event<T>>,
}

impl<T, H: core::fmt::Debug> core::fmt::Debug for EventSerializer<T, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventSerializer")
            .field("presenter", &self.presenter)
            .field("queued", &self.rx.len())
            .finish_non_exhaustive()
    }
}

impl<T: Clone, H: HostingStrategy<T>> EventSerializer<T, H> {
    /// Take ownership of `presenter`.
    pub fn new(presenter: Presenter<T, H>) -> Self {
        let (tx, rx) = unbounded();
        Self { presenter, tx, rx }
    }

    /// A new handle for sending requests.
    pub fn handle(&self) -> PresenterHandle<T> {
        PresenterHandle {
            tx: self.tx.clone(),
        }
    }

    /// The owned presenter.
    pub fn presenter(&self) -> &Presenter<T, H> {
        &self.presenter
    }

    /// The owned presenter, mutably, for calls made on the driving context.
    pub fn presenter_mut(&mut self) -> &mut Presenter<T, H> {
        &mut self.presenter
    }

    /// Give the presenter back.
    pub fn into_presenter(self) -> Presenter<T, H> {
        self.presenter
    }

    /// Fire due timers, then apply the events queued when the call began.
    ///
    /// Returns the number of events applied. Events sent while pumping wait for
    /// the next call.
    pub fn pump(&mut self, now: Duration) -> usize {
        self.presenter.poll(now);
        let pending = self.rx.len();
        let mut applied = 0;
        for event in self.rx.try_iter().take(pending) {
            self.presenter.dispatch(now, event);
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(applied, "pumped presentation events");
        }
        applied
    }

    /// Drive the presenter on the current thread until every handle is dropped.
    ///
    /// Sleeps until the next message or the next timer deadline, whichever
    /// comes first. Returns the presenter once the channel disconnects.
    pub fn run(self, clock: &impl Clock) -> Presenter<T, H> {
        let Self { mut presenter, tx, rx } = self;
        drop(tx);
        loop {
            let now = clock.now();
            presenter.poll(now);
            let received = match presenter.next_deadline() {
                Some(deadline) => rx.recv_timeout(deadline.saturating_sub(now)),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(event) => presenter.dispatch(clock.now(), event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("all presenter handles dropped; actor stopped");
        presenter
    }
}
