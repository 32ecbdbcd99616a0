// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autohide: request dismissal after a configured duration.

use core::time::Duration;

use crate::config::PresentationConfig;
use crate::timer::DelayedAction;

/// Owns the one autohide deadline of an overlay.
///
/// Arming is driven by [`PresentationConfig::effective_autohide`], so persistent
/// content and absent or zero durations never arm.
#[derive(Clone, Debug, Default)]
pub struct AutohideScheduler {
    action: DelayedAction,
}

impl AutohideScheduler {
    /// An idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for `config`, replacing any armed deadline.
    pub fn arm(&mut self, now: Duration, config: &PresentationConfig) {
        match config.effective_autohide() {
            Some(after) => self.action.arm(now, after),
            None => self.action.cancel(),
        }
    }

    /// Cancel the armed deadline, if any.
    pub fn cancel(&mut self) {
        self.action.cancel();
    }

    /// Deadline of the armed autohide.
    pub fn deadline(&self) -> Option<Duration> {
        self.action.deadline()
    }

    /// Returns `true` once when the autohide deadline has passed.
    pub fn poll(&mut self, now: Duration) -> bool {
        self.action.fire_if_due(now)
    }
}
