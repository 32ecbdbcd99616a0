// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-dismiss: constrain drag motion and decide on release.
//!
//! ## Rules
//!
//! - Only the axis of the appear animation participates; in-place appearances
//!   have no drag axis.
//! - Only motion back toward the origin ("closing") is honored. For
//!   [`BottomSlide`](AppearAnimation::BottomSlide) that is downward; upward
//!   motion clamps to zero.
//! - On release, honored displacement strictly greater than the threshold
//!   dismisses; anything else springs back.
//! - An autohide that fires mid-drag is deferred: it sets a time-to-hide flag
//!   that forces dismissal on release regardless of displacement.
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use understory_presentation::drag::{DragDismissController, DragOutcome, threshold};
//! use understory_presentation::types::{AppearAnimation, DismissSource};
//!
//! let anim = AppearAnimation::BottomSlide;
//! let limit = threshold(anim, Size::new(300.0, 100.0), None);
//! let mut drag = DragDismissController::new();
//! assert_eq!(drag.update(anim, Vec2::new(5.0, -30.0)), Vec2::ZERO);
//! assert_eq!(drag.update(anim, Vec2::new(5.0, 40.0)), Vec2::new(0.0, 40.0));
//! assert_eq!(drag.end(anim, limit), DragOutcome::Dismiss(DismissSource::Drag));
//! ```

use kurbo::{Size, Vec2};

use crate::types::{AppearAnimation, Axis, DismissSource};

/// Decision taken when a drag ends.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DragOutcome {
    /// Hide, recording the given source.
    Dismiss(DismissSource),
    /// Animate back to the resting offset.
    SpringBack,
}

/// Dismissal threshold along the drag axis.
///
/// `explicit` wins when present; otherwise one third of the content extent on
/// the axis. In-place appearances return infinity (never dismiss by drag).
pub fn threshold(animation: AppearAnimation, content: Size, explicit: Option<f64>) -> f64 {
    if let Some(d) = explicit {
        return d;
    }
    match animation.axis() {
        Some(Axis::Vertical) => content.height / 3.0,
        Some(Axis::Horizontal) => content.width / 3.0,
        None => f64::INFINITY,
    }
}

/// Tracks one drag gesture over the overlay.
#[derive(Clone, Debug, Default)]
pub struct DragDismissController {
    dragging: bool,
    honored: Vec2,
    time_to_hide: bool,
}

impl DragDismissController {
    /// An idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// True between the first update and the end of a gesture.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Record the gesture's total translation and return the honored offset.
    pub fn update(&mut self, animation: AppearAnimation, translation: Vec2) -> Vec2 {
        self.dragging = true;
        let sign = animation.closing_sign();
        self.honored = match animation.axis() {
            Some(Axis::Vertical) if translation.y * sign > 0.0 => Vec2::new(0.0, translation.y),
            Some(Axis::Horizontal) if translation.x * sign > 0.0 => Vec2::new(translation.x, 0.0),
            _ => Vec2::ZERO,
        };
        self.honored
    }

    /// Defer an autohide until the gesture ends.
    pub fn defer_autohide(&mut self) {
        self.time_to_hide = true;
    }

    /// End the gesture and decide whether to dismiss.
    pub fn end(&mut self, animation: AppearAnimation, threshold: f64) -> DragOutcome {
        let displacement = match animation.axis() {
            Some(Axis::Vertical) => self.honored.y.abs(),
            Some(Axis::Horizontal) => self.honored.x.abs(),
            None => 0.0,
        };
        let forced = self.time_to_hide;
        self.reset();
        if forced {
            DragOutcome::Dismiss(DismissSource::Autohide)
        } else if displacement > threshold {
            DragOutcome::Dismiss(DismissSource::Drag)
        } else {
            DragOutcome::SpringBack
        }
    }

    /// Forget the gesture and any deferred autohide.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Size = Size::new(300.0, 100.0);

    // 100-high bottom slide: 20 down springs back, 40 down dismisses.
    #[test]
    fn bottom_slide_threshold() {
        let anim = AppearAnimation::BottomSlide;
        let limit = threshold(anim, BOX, None);
        assert!((limit - 100.0 / 3.0).abs() < 1e-9);

        let mut d = DragDismissController::new();
        let _ = d.update(anim, Vec2::new(0.0, 20.0));
        assert_eq!(d.end(anim, limit), DragOutcome::SpringBack);

        let _ = d.update(anim, Vec2::new(0.0, 40.0));
        assert_eq!(d.end(anim, limit), DragOutcome::Dismiss(DismissSource::Drag));
        assert!(!d.is_dragging());
    }

    // Upward motion on a bottom slide never counts toward dismissal.
    #[test]
    fn opening_direction_clamps() {
        let anim = AppearAnimation::BottomSlide;
        let mut d = DragDismissController::new();
        assert_eq!(d.update(anim, Vec2::new(50.0, -200.0)), Vec2::ZERO);
        assert_eq!(d.end(anim, 10.0), DragOutcome::SpringBack);
    }

    #[test]
    fn horizontal_slides() {
        let mut d = DragDismissController::new();
        let left = AppearAnimation::LeftSlide;
        assert_eq!(d.update(left, Vec2::new(-120.0, 30.0)), Vec2::new(-120.0, 0.0));
        assert_eq!(
            d.end(left, threshold(left, BOX, None)),
            DragOutcome::Dismiss(DismissSource::Drag)
        );
        let right = AppearAnimation::RightSlide;
        assert_eq!(d.update(right, Vec2::new(-120.0, 0.0)), Vec2::ZERO);
        assert_eq!(d.end(right, 1.0), DragOutcome::SpringBack);
    }

    #[test]
    fn explicit_distance_wins() {
        let anim = AppearAnimation::TopSlide;
        assert_eq!(threshold(anim, BOX, Some(5.0)), 5.0);
        let mut d = DragDismissController::new();
        let _ = d.update(anim, Vec2::new(0.0, -6.0));
        assert_eq!(d.end(anim, 5.0), DragOutcome::Dismiss(DismissSource::Drag));
    }

    #[test]
    fn in_place_has_no_axis() {
        let anim = AppearAnimation::CenterScale;
        let mut d = DragDismissController::new();
        assert_eq!(d.update(anim, Vec2::new(400.0, 400.0)), Vec2::ZERO);
        assert_eq!(
            d.end(anim, threshold(anim, BOX, None)),
            DragOutcome::SpringBack
        );
    }

    // A deferred autohide forces dismissal even with no displacement.
    #[test]
    fn deferred_autohide_forces_dismissal() {
        let anim = AppearAnimation::BottomSlide;
        let mut d = DragDismissController::new();
        let _ = d.update(anim, Vec2::new(0.0, 1.0));
        d.defer_autohide();
        assert_eq!(d.end(anim, 50.0), DragOutcome::Dismiss(DismissSource::Autohide));
        // The deferral belongs to that gesture only.
        let _ = d.update(anim, Vec2::new(0.0, 1.0));
        assert_eq!(d.end(anim, 50.0), DragOutcome::SpringBack);
    }
}
