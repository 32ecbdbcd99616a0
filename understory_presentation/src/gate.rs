// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismiss gate: a timed lock on user dismissal.
//!
//! While the gate is closed, tap-inside, tap-outside, and drag dismissal are
//! refused. Programmatic dismissal (binding, autohide) ignores the gate.
//!
//! ```
//! use core::time::Duration;
//! use understory_presentation::gate::DismissGate;
//!
//! let mut gate = DismissGate::new(Some(Duration::from_secs(1)));
//! gate.arm(Duration::ZERO);
//! assert!(!gate.is_open());
//! assert!(!gate.poll(Duration::from_millis(200)));
//! assert!(gate.poll(Duration::from_millis(1200)));
//! assert!(gate.is_open());
//! ```

use core::time::Duration;

use crate::timer::DelayedAction;

/// Owns the one unlock deadline of an overlay and the observable flag it flips.
#[derive(Clone, Debug)]
pub struct DismissGate {
    action: DelayedAction,
    delay: Option<Duration>,
    open: bool,
}

impl Default for DismissGate {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DismissGate {
    /// A gate that locks for `delay` each time it is armed.
    ///
    /// Absent or zero delays leave the gate permanently open.
    pub fn new(delay: Option<Duration>) -> Self {
        let delay = delay.filter(|d| !d.is_zero());
        Self {
            action: DelayedAction::new(),
            open: delay.is_none(),
            delay,
        }
    }

    /// True while user dismissal is allowed.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Deadline of the pending unlock.
    pub fn deadline(&self) -> Option<Duration> {
        self.action.deadline()
    }

    /// Close the gate and schedule the unlock, replacing any pending unlock.
    ///
    /// With no delay configured the gate stays open and nothing is armed.
    pub fn arm(&mut self, now: Duration) {
        match self.delay {
            Some(delay) => {
                self.open = false;
                self.action.arm(now, delay);
            }
            None => {
                self.action.cancel();
                self.open = true;
            }
        }
    }

    /// Change the delay.
    ///
    /// A pending unlock is moved to `delay` after `now`; elapsed time before the
    /// change does not count, so the gate never unlocks retroactively. A gate
    /// that is not pending keeps its state until the next [`arm`](Self::arm).
    pub fn set_delay(&mut self, now: Duration, delay: Option<Duration>) {
        self.delay = delay.filter(|d| !d.is_zero());
        if self.action.is_armed() {
            self.action.rearm(now, self.delay.unwrap_or(Duration::ZERO));
        }
    }

    /// Cancel the pending unlock without changing the flag.
    pub fn cancel(&mut self) {
        self.action.cancel();
    }

    /// Reset after teardown so the next show starts the gate fresh.
    pub fn reset(&mut self) {
        self.action.cancel();
        self.open = self.delay.is_none();
    }

    /// Unlock if the deadline passed. Returns `true` when the flag changed.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.action.fire_if_due(now) && !self.open {
            self.open = true;
            return true;
        }
        false
    }
}
