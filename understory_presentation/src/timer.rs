// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot cancellable delayed action.
//!
//! A [`DelayedAction`] holds at most one deadline. Arming replaces whatever was
//! armed before; cancelling an idle slot is a no-op. Nothing here reads a
//! clock: callers pass `now` as a monotonic [`Duration`] and poll with
//! [`DelayedAction::fire_if_due`].
//! A cancelled or fired slot has no deadline, so a late poll can never fire it.
//!
//! ```
//! use core::time::Duration;
//! use understory_presentation::timer::DelayedAction;
//!
//! let mut slot = DelayedAction::new();
//! slot.arm(Duration::ZERO, Duration::from_secs(2));
//! slot.arm(Duration::from_millis(500), Duration::from_secs(2));
//! assert_eq!(slot.deadline(), Some(Duration::from_millis(2500)));
//! assert!(!slot.fire_if_due(Duration::from_secs(2)));
//! assert!(slot.fire_if_due(Duration::from_millis(2500)));
//! assert!(!slot.fire_if_due(Duration::from_secs(10)));
//! ```

use core::time::Duration;

/// A cancellable action that fires once after a delay.
#[derive(Clone, Debug, Default)]
pub struct DelayedAction {
    deadline: Option<Duration>,
}

impl DelayedAction {
    /// An idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot to fire `delay` after `now`, replacing any armed action.
    ///
    /// A zero `delay` only cancels; nothing is armed.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = (!delay.is_zero()).then(|| now.saturating_add(delay));
    }

    /// Move the deadline of the armed action to `delay` after `now`.
    ///
    /// No-op when idle.
    pub fn rearm(&mut self, now: Duration, delay: Duration) {
        if let Some(deadline) = &mut self.deadline {
            *deadline = now.saturating_add(delay);
        }
    }

    /// Cancel the armed action, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True while an action is armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the armed action.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Fire the armed action if its deadline has passed.
    ///
    /// Returns `true` exactly once per arming; the slot is idle afterwards.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.cancel();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_once() {
        let mut a = DelayedAction::new();
        a.arm(ms(0), ms(100));
        assert!(a.is_armed());
        assert!(!a.fire_if_due(ms(99)));
        assert!(a.fire_if_due(ms(100)));
        assert!(!a.fire_if_due(ms(200)));
        assert!(!a.is_armed());
    }

    // Cancelling twice, or after firing, is harmless.
    #[test]
    fn double_cancel_is_noop() {
        let mut a = DelayedAction::new();
        a.arm(ms(0), ms(10));
        a.cancel();
        a.cancel();
        assert!(!a.fire_if_due(ms(50)));
        a.arm(ms(0), ms(10));
        assert!(a.fire_if_due(ms(10)));
        a.cancel();
        assert!(!a.is_armed());
    }

    #[test]
    fn zero_delay_only_cancels() {
        let mut a = DelayedAction::new();
        a.arm(ms(0), ms(10));
        a.arm(ms(5), Duration::ZERO);
        assert!(!a.is_armed());
        assert!(!a.fire_if_due(ms(10)));
    }

    // Arming again replaces the earlier deadline.
    #[test]
    fn rearming_replaces_deadline() {
        let mut a = DelayedAction::new();
        a.arm(ms(0), ms(100));
        a.arm(ms(50), ms(100));
        assert!(!a.fire_if_due(ms(100)));
        assert!(a.fire_if_due(ms(150)));
    }

    #[test]
    fn rearm_moves_deadline() {
        let mut a = DelayedAction::new();
        a.arm(ms(0), ms(1000));
        a.rearm(ms(200), ms(300));
        assert_eq!(a.deadline(), Some(ms(500)));
        let mut idle = DelayedAction::new();
        idle.rearm(ms(200), ms(300));
        assert!(!idle.is_armed());
    }
}
