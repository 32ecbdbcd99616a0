// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation configuration.
//!
//! [`PresentationConfig`] is a plain struct with public fields and chainable
//! `with_*` helpers. Pass it to
//! [`PresentationStateMachine::configure`](crate::machine::PresentationStateMachine::configure),
//! which validates it with [`PresentationConfig::validate`].
//!
//! ```
//! use core::time::Duration;
//! use understory_presentation::config::PresentationConfig;
//! use understory_presentation::types::{Anchor, AppearAnimation};
//!
//! let config = PresentationConfig::default()
//!     .with_anchor(Anchor::TOP)
//!     .with_appear(AppearAnimation::TopSlide)
//!     .with_autohide(Duration::from_secs(3));
//! assert!(config.validate().is_ok());
//! assert_eq!(config.disappear(), AppearAnimation::TopSlide);
//! ```

use core::time::Duration;

use kurbo::Insets;

use crate::types::{Anchor, AppearAnimation, ContentCategory, DisplayMode, Timing};

/// Rejected configuration input.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Explicit drag distance is negative, zero, or not finite.
    #[error("drag distance must be a positive finite number, got {0}")]
    InvalidDragDistance(f64),
    /// Padding contains a non-finite component.
    #[error("padding must be finite, got {0:?}")]
    InvalidPadding(Insets),
    /// The hosting strategy cannot mount in the requested display mode.
    #[error("display mode {requested:?} requested but the host mounts {host:?}")]
    UnsupportedDisplayMode {
        /// Mode named by the configuration.
        requested: DisplayMode,
        /// Mode the host implements.
        host: DisplayMode,
    },
}

/// Everything that shapes one overlay's presentation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresentationConfig {
    /// How the hosting strategy mounts the overlay.
    pub display_mode: DisplayMode,
    /// Resting position inside the container.
    pub anchor: Anchor,
    /// Entrance animation.
    pub appear_from: AppearAnimation,
    /// Exit animation; `None` mirrors `appear_from`.
    pub disappear_to: Option<AppearAnimation>,
    /// Hide automatically after this long; absent or zero disables autohide.
    pub autohide: Option<Duration>,
    /// Refuse tap and drag dismissal until this long after positioning.
    pub dismissible_after: Option<Duration>,
    /// Allow dragging the content back toward its origin to dismiss.
    pub drag_to_dismiss: bool,
    /// Explicit drag dismissal threshold; defaults to a third of the content extent.
    pub drag_distance: Option<f64>,
    /// Dismiss when the content itself is tapped.
    pub close_on_tap_inside: bool,
    /// Dismiss when the background around the content is tapped.
    pub close_on_tap_outside: bool,
    /// Let background taps reach the views underneath.
    pub allow_tap_through: bool,
    /// Autohide exemption category.
    pub category: ContentCategory,
    /// Extra distance from the anchored container edges.
    pub padding: Insets,
    /// Keep the content inside the safe area.
    pub honor_safe_area: bool,
    /// Entrance and exit animation timing.
    pub timing: Timing,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Overlay,
            anchor: Anchor::BOTTOM,
            appear_from: AppearAnimation::BottomSlide,
            disappear_to: None,
            autohide: None,
            dismissible_after: None,
            drag_to_dismiss: true,
            drag_distance: None,
            close_on_tap_inside: false,
            close_on_tap_outside: false,
            allow_tap_through: true,
            category: ContentCategory::Transient,
            padding: Insets::ZERO,
            honor_safe_area: true,
            timing: Timing::default(),
        }
    }
}

impl PresentationConfig {
    /// Set the display mode.
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Set the resting anchor.
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the entrance animation (and, unless overridden, the exit).
    pub fn with_appear(mut self, appear: AppearAnimation) -> Self {
        self.appear_from = appear;
        self
    }

    /// Set an exit animation different from the entrance.
    pub fn with_disappear(mut self, disappear: AppearAnimation) -> Self {
        self.disappear_to = Some(disappear);
        self
    }

    /// Enable autohide after `after`.
    pub fn with_autohide(mut self, after: Duration) -> Self {
        self.autohide = Some(after);
        self
    }

    /// Lock tap and drag dismissal for `after` once positioned.
    pub fn with_dismissible_after(mut self, after: Duration) -> Self {
        self.dismissible_after = Some(after);
        self
    }

    /// Enable or disable drag-to-dismiss.
    pub fn with_drag_to_dismiss(mut self, enabled: bool) -> Self {
        self.drag_to_dismiss = enabled;
        self
    }

    /// Set an explicit drag dismissal threshold.
    pub fn with_drag_distance(mut self, distance: f64) -> Self {
        self.drag_distance = Some(distance);
        self
    }

    /// Enable or disable tap-inside dismissal.
    pub fn with_close_on_tap_inside(mut self, enabled: bool) -> Self {
        self.close_on_tap_inside = enabled;
        self
    }

    /// Enable or disable tap-outside dismissal.
    pub fn with_close_on_tap_outside(mut self, enabled: bool) -> Self {
        self.close_on_tap_outside = enabled;
        self
    }

    /// Let background taps through (`true`) or swallow them (`false`).
    pub fn with_tap_through(mut self, allowed: bool) -> Self {
        self.allow_tap_through = allowed;
        self
    }

    /// Set the content category.
    pub fn with_category(mut self, category: ContentCategory) -> Self {
        self.category = category;
        self
    }

    /// Set padding from the anchored edges.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Keep content inside (`true`) or let it extend under (`false`) the safe area.
    pub fn with_honor_safe_area(mut self, honor: bool) -> Self {
        self.honor_safe_area = honor;
        self
    }

    /// Set the animation timing.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Effective exit animation.
    pub fn disappear(&self) -> AppearAnimation {
        self.disappear_to.unwrap_or(self.appear_from)
    }

    /// Autohide delay that will actually be armed, if any.
    ///
    /// Persistent content never autohides, whatever the configured duration.
    pub fn effective_autohide(&self) -> Option<Duration> {
        match self.category {
            ContentCategory::Persistent => None,
            ContentCategory::Transient => self.autohide.filter(|d| !d.is_zero()),
        }
    }

    /// Check the values the engine cannot correct locally.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(d) = self.drag_distance
            && !(d.is_finite() && d > 0.0)
        {
            return Err(ConfigError::InvalidDragDistance(d));
        }
        let p = self.padding;
        if ![p.x0, p.y0, p.x1, p.y1].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidPadding(p));
        }
        Ok(())
    }
}
