// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_presentation --heading-base-level=0

//! Understory Presentation: a deterministic, `no_std` engine for toasts, popups, and sheets.
//!
//! ## Overview
//!
//! This crate decides *when* an overlay is mounted, *where* it rests, and *how* it enters and leaves.
//! It does not draw anything.
//! Instead, it emits [`Effect`](crate::machine::Effect)s (mount, move, animate, unmount, notify) that a rendering layer applies,
//! and it consumes events back from that layer (measurements, animation completions, taps, drags).
//!
//! ## Lifecycle
//!
//! Each overlay walks `Hidden → Appearing → Shown → Dismissing → Hidden`.
//! - Content is mounted on show but parked off-screen until both the container and the content have a non-zero size.
//!   At that moment [`Positioned`](crate::machine::Effect::Positioned) fires, the entrance starts, and timers arm.
//! - A hide keeps the content mounted until its exit animation completes; only then is it unmounted.
//! - A show that arrives mid-exit reverses into the entrance without unmounting.
//!
//! ## Placement
//!
//! [`placement`](crate::placement) computes resting and off-screen offsets from an [`Anchor`](crate::types::Anchor),
//! padding, and the container's safe area. Slides start just outside the container on their axis; scale and fade
//! appearances stay in place.
//!
//! ## Dismissal
//!
//! An overlay can be dismissed by its binding, by an autohide timer, by a tap inside or outside, or by dragging it
//! back toward where it came from. A dismiss gate can lock the user-driven paths for a while after the overlay appears.
//! Every dismissal reports its [`DismissSource`](crate::types::DismissSource).
//!
//! ## Time
//!
//! Nothing here reads a clock. Pass `now` as a monotonic [`Duration`](core::time::Duration) to every call and
//! [`poll`](crate::machine::PresentationStateMachine::poll) at
//! [`next_deadline`](crate::machine::PresentationStateMachine::next_deadline).
//!
//! ## Layering
//!
//! - [`PresentationStateMachine`](crate::machine::PresentationStateMachine): the sans-IO core.
//! - [`Presenter`](crate::host::Presenter): applies effects to a [`HostingStrategy`](crate::host::HostingStrategy)
//!   and fans callbacks out to [`Observer`](crate::host::Observer)s.
//! - `EventSerializer` (with the `std` feature): lets any thread send requests that one context applies in order.
//!
//! ## Features
//!
//! - `std` (default): enables `EventSerializer` and kurbo's `std` support.
//! - `libm`: kurbo math without `std`.
//! - `serde`: serialization for configuration types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod autohide;
pub mod config;
pub mod drag;
pub mod gate;
pub mod host;
pub mod machine;
pub mod placement;
#[cfg(feature = "std")]
pub mod serializer;
pub mod timer;
pub mod types;
