// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types: anchors, appear animations, dismiss sources, visuals, and timing.
//!
//! ## Overview
//!
//! These types describe what the engine is asked to do and what it asks the
//! rendering layer to draw. They are referenced by the
//! [`machine`](crate::machine) and by hosting strategies in [`host`](crate::host).

use core::time::Duration;

use kurbo::{Insets, Point, Size};

/// How the overlay is hosted relative to the rest of the UI tree.
///
/// The state machine does not branch on this; it is reported to the
/// [`HostingStrategy`](crate::host::HostingStrategy) so it can choose where to mount.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    /// Mounted in place, above the presenting view.
    #[default]
    Overlay,
    /// Mounted inside a transparent modal sheet.
    Sheet,
    /// Mounted in a dedicated window above the application.
    Window,
}

/// Vertical component of an [`Anchor`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlign {
    /// Pinned to the top edge.
    Top,
    /// Centered vertically.
    Center,
    /// Pinned to the bottom edge.
    Bottom,
}

/// Horizontal component of an [`Anchor`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlign {
    /// Pinned to the leading edge.
    Leading,
    /// Centered horizontally.
    Center,
    /// Pinned to the trailing edge.
    Trailing,
}

/// Resting position of the overlay inside its container.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    /// Vertical placement.
    pub vertical: VerticalAlign,
    /// Horizontal placement.
    pub horizontal: HorizontalAlign,
}

impl Anchor {
    /// Top edge, horizontally centered.
    pub const TOP: Self = Self::new(VerticalAlign::Top, HorizontalAlign::Center);
    /// Top-leading corner.
    pub const TOP_LEADING: Self = Self::new(VerticalAlign::Top, HorizontalAlign::Leading);
    /// Top-trailing corner.
    pub const TOP_TRAILING: Self = Self::new(VerticalAlign::Top, HorizontalAlign::Trailing);
    /// Centered on both axes.
    pub const CENTER: Self = Self::new(VerticalAlign::Center, HorizontalAlign::Center);
    /// Leading edge, vertically centered.
    pub const LEADING: Self = Self::new(VerticalAlign::Center, HorizontalAlign::Leading);
    /// Trailing edge, vertically centered.
    pub const TRAILING: Self = Self::new(VerticalAlign::Center, HorizontalAlign::Trailing);
    /// Bottom edge, horizontally centered.
    pub const BOTTOM: Self = Self::new(VerticalAlign::Bottom, HorizontalAlign::Center);
    /// Bottom-leading corner.
    pub const BOTTOM_LEADING: Self = Self::new(VerticalAlign::Bottom, HorizontalAlign::Leading);
    /// Bottom-trailing corner.
    pub const BOTTOM_TRAILING: Self = Self::new(VerticalAlign::Bottom, HorizontalAlign::Trailing);

    /// Combine an explicit vertical and horizontal placement.
    pub const fn new(vertical: VerticalAlign, horizontal: HorizontalAlign) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::BOTTOM
    }
}

/// Axis along which a slide moves.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Left/right.
    Horizontal,
    /// Up/down.
    Vertical,
}

/// Where the overlay comes from on entry (or goes to on exit).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppearAnimation {
    /// Slides in from above the container.
    TopSlide,
    /// Slides in from below the container.
    #[default]
    BottomSlide,
    /// Slides in from the left of the container.
    LeftSlide,
    /// Slides in from the right of the container.
    RightSlide,
    /// Scales and fades in place.
    CenterScale,
    /// Fades in place.
    None,
}

impl AppearAnimation {
    /// Axis of motion for directional slides, `None` for in-place appearances.
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::TopSlide | Self::BottomSlide => Some(Axis::Vertical),
            Self::LeftSlide | Self::RightSlide => Some(Axis::Horizontal),
            Self::CenterScale | Self::None => None,
        }
    }

    /// Sign of motion that moves the content back toward where it came from.
    ///
    /// `1.0` for positive (down/right), `-1.0` for negative (up/left), `0.0` when
    /// there is no drag axis.
    pub const fn closing_sign(self) -> f64 {
        match self {
            Self::BottomSlide | Self::RightSlide => 1.0,
            Self::TopSlide | Self::LeftSlide => -1.0,
            Self::CenterScale | Self::None => 0.0,
        }
    }
}

/// Recorded cause of a hide transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DismissSource {
    /// Tap on the overlay content.
    TapInside,
    /// Tap on the background around the overlay.
    TapOutside,
    /// Drag past the dismissal threshold.
    Drag,
    /// Autohide timer fired.
    Autohide,
    /// The presenting flag went false or the item went nil.
    Binding,
}

/// Logical visibility of the overlay.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VisibilityState {
    /// Not mounted.
    Hidden,
    /// Mounted and animating toward the resting visual.
    Appearing,
    /// Mounted and settled.
    Shown,
    /// Mounted and animating toward the hidden visual.
    Dismissing,
}

impl VisibilityState {
    /// True while content is mounted.
    pub const fn is_mounted(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Whether the content may be hidden by the autohide timer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentCategory {
    /// Regular notice; honors the configured autohide duration.
    #[default]
    Transient,
    /// Stays until dismissed (e.g. a loading indicator); never autohides.
    Persistent,
}

/// What the rendering layer draws for the overlay container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Visual {
    /// Top-left corner of the content in container coordinates.
    pub offset: Point,
    /// Uniform scale around the content center.
    pub scale: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl Visual {
    /// A fully opaque, unscaled visual at `offset`.
    pub const fn at(offset: Point) -> Self {
        Self {
            offset,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Easing curve requested from the rendering layer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// Constant speed.
    Linear,
    /// Accelerating.
    EaseIn,
    /// Decelerating.
    #[default]
    EaseOut,
    /// Accelerating, then decelerating.
    EaseInOut,
    /// Physically based spring; `duration` is the settle estimate.
    Spring,
}

/// Duration and curve of an animation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    /// Length of the animation.
    pub duration: Duration,
    /// Easing curve.
    pub curve: Curve,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            curve: Curve::EaseOut,
        }
    }
}

/// Identifier of one animation request.
///
/// Ids increase monotonically per state machine. Hosts report completion with
/// the same id; completions of ids the machine no longer waits on are ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AnimationId(pub(crate) u64);

impl AnimationId {
    /// Raw value, for logging and host bookkeeping.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// How an animation ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Completion {
    /// Reached its target.
    Finished,
    /// Pre-empted by a later animation request.
    Superseded,
}

/// Container geometry reported by the hosting strategy.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Full size of the container.
    pub size: Size,
    /// Safe-area insets of the container.
    pub safe_area: Insets,
}

impl Geometry {
    /// Geometry with no safe-area insets.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            safe_area: Insets::ZERO,
        }
    }

    /// Set the safe-area insets.
    pub const fn with_safe_area(mut self, safe_area: Insets) -> Self {
        self.safe_area = safe_area;
        self
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}
