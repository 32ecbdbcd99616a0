// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement: resting and off-screen coordinates for the overlay.
//!
//! ## Overview
//!
//! Pure functions, no state. Given the container [`Geometry`], the measured
//! content [`Size`], an [`Anchor`], padding, and whether to honor the safe
//! area, [`resting_offset`] returns the top-left corner of the content once
//! shown. [`hidden_visual`] returns where (and how opaque and how large) the
//! content is before its entrance or after its exit.
//!
//! ## Coordinates
//!
//! Offsets are in container coordinates with the origin at the container's
//! top-left, `y` growing downward. Each axis is computed independently:
//!
//! - leading/top: `padding + (honor ? inset : 0)`
//! - centered: `(container - content) / 2`, shifted by half the difference of
//!   the two insets when honoring the safe area
//! - trailing/bottom: `container - content - padding - (honor ? inset : 0)`
//!
//! Content that has not been measured (zero area) maps to [`OFFSCREEN`], so
//! nothing flickers into view before the first layout pass.
//!
//! ```
//! use kurbo::{Insets, Point, Size};
//! use understory_presentation::placement::{Placement, resting_offset};
//! use understory_presentation::types::{Anchor, Geometry};
//!
//! let geometry = Geometry::new(Size::new(400.0, 800.0));
//! let p = Placement { anchor: Anchor::BOTTOM, padding: Insets::uniform(10.0), honor_safe_area: true };
//! let at = resting_offset(&p, &geometry, Size::new(200.0, 100.0));
//! assert_eq!(at, Point::new(100.0, 690.0));
//! ```

use kurbo::{Insets, Point, Size};

use crate::config::PresentationConfig;
use crate::types::{Anchor, AppearAnimation, Geometry, HorizontalAlign, VerticalAlign, Visual};

/// Sentinel offset far outside any screen, used before the content is measured.
pub const OFFSCREEN: Point = Point::new(-100_000.0, -100_000.0);

/// Scale used by [`AppearAnimation::CenterScale`] while hidden.
pub const HIDDEN_SCALE: f64 = 0.2;

/// The subset of configuration that decides the resting offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Anchor inside the container.
    pub anchor: Anchor,
    /// Distance from anchored edges.
    pub padding: Insets,
    /// Keep the content inside the safe area.
    pub honor_safe_area: bool,
}

impl From<&PresentationConfig> for Placement {
    fn from(config: &PresentationConfig) -> Self {
        Self {
            anchor: config.anchor,
            padding: config.padding,
            honor_safe_area: config.honor_safe_area,
        }
    }
}

#[derive(Copy, Clone)]
enum Edge {
    Start,
    Center,
    End,
}

// One axis of the resting offset.
fn axis_offset(
    edge: Edge,
    container: f64,
    content: f64,
    pad_start: f64,
    pad_end: f64,
    inset_start: f64,
    inset_end: f64,
    honor: bool,
) -> f64 {
    match edge {
        Edge::Start => pad_start + if honor { inset_start } else { 0.0 },
        Edge::Center => {
            let centered = (container - content) / 2.0;
            if honor {
                centered + (inset_start - inset_end) / 2.0
            } else {
                centered
            }
        }
        Edge::End => container - content - pad_end - if honor { inset_end } else { 0.0 },
    }
}

/// True when `size` describes something that has been laid out.
pub fn is_measured(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0 && size.is_finite()
}

/// Top-left corner of the content once fully shown.
///
/// Returns [`OFFSCREEN`] for unmeasured content.
pub fn resting_offset(placement: &Placement, geometry: &Geometry, content: Size) -> Point {
    if !is_measured(content) {
        return OFFSCREEN;
    }
    let Placement {
        anchor,
        padding,
        honor_safe_area,
    } = *placement;
    let insets = geometry.safe_area;
    let x_edge = match anchor.horizontal {
        HorizontalAlign::Leading => Edge::Start,
        HorizontalAlign::Center => Edge::Center,
        HorizontalAlign::Trailing => Edge::End,
    };
    let y_edge = match anchor.vertical {
        VerticalAlign::Top => Edge::Start,
        VerticalAlign::Center => Edge::Center,
        VerticalAlign::Bottom => Edge::End,
    };
    let x = axis_offset(
        x_edge,
        geometry.size.width,
        content.width,
        padding.x0,
        padding.x1,
        insets.x0,
        insets.x1,
        honor_safe_area,
    );
    let y = axis_offset(
        y_edge,
        geometry.size.height,
        content.height,
        padding.y0,
        padding.y1,
        insets.y0,
        insets.y1,
        honor_safe_area,
    );
    Point::new(x, y)
}

/// Top-left corner of the content before entrance / after exit.
///
/// Slides sit just outside the container on their axis and keep the resting
/// coordinate on the other axis; in-place appearances keep the resting point.
pub fn offscreen_offset(
    animation: AppearAnimation,
    resting: Point,
    geometry: &Geometry,
    content: Size,
) -> Point {
    if !is_measured(content) {
        return OFFSCREEN;
    }
    let insets = geometry.safe_area;
    match animation {
        AppearAnimation::TopSlide => Point::new(resting.x, -(content.height + insets.y0)),
        AppearAnimation::BottomSlide => Point::new(resting.x, geometry.size.height + insets.y1),
        AppearAnimation::LeftSlide => Point::new(-(content.width + insets.x0), resting.y),
        AppearAnimation::RightSlide => Point::new(geometry.size.width + insets.x1, resting.y),
        AppearAnimation::CenterScale | AppearAnimation::None => resting,
    }
}

/// Visual of the fully shown content.
pub fn resting_visual(placement: &Placement, geometry: &Geometry, content: Size) -> Visual {
    Visual::at(resting_offset(placement, geometry, content))
}

/// Visual of the content before entrance / after exit for `animation`.
///
/// Slides stay fully opaque; `CenterScale` shrinks and fades; `None` fades.
pub fn hidden_visual(
    animation: AppearAnimation,
    placement: &Placement,
    geometry: &Geometry,
    content: Size,
) -> Visual {
    let resting = resting_offset(placement, geometry, content);
    let offset = offscreen_offset(animation, resting, geometry, content);
    match animation {
        AppearAnimation::CenterScale => Visual {
            offset,
            scale: HIDDEN_SCALE,
            opacity: 0.0,
        },
        AppearAnimation::None => Visual {
            offset,
            scale: 1.0,
            opacity: 0.0,
        },
        _ => Visual::at(offset),
    }
}
