// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation state machine.
//!
//! ## Overview
//!
//! [`PresentationStateMachine`] owns one overlay's lifecycle:
//! `Hidden → Appearing → Shown → Dismissing → Hidden`. Feed it [`Event`]s with
//! [`dispatch`](PresentationStateMachine::dispatch) and apply the returned
//! [`Effect`]s to your rendering layer, or let a
//! [`Presenter`](crate::host::Presenter) do that for you.
//!
//! It never reads a clock. Every call takes `now` as a monotonic [`Duration`]
//! and due timers (autohide, dismiss gate) fire at the start of each call or
//! from [`poll`](PresentationStateMachine::poll). Ask
//! [`next_deadline`](PresentationStateMachine::next_deadline) when to poll next.
//!
//! ## Modes
//!
//! A machine is built in exactly one [`RequestMode`]. In [`RequestMode::Flag`]
//! a boolean drives visibility and content comes from [`Event::SetContent`]. In
//! [`RequestMode::Item`] the presence of an item drives visibility and the item
//! is the content; while it fades out after going nil, the machine keeps a copy.
//!
//! ## Animations
//!
//! Each [`Effect::Animate`] carries an [`AnimationId`]. The host reports every
//! id back exactly once with [`Event::AnimationFinished`], including ids that a
//! later request pre-empted. Only the id the machine is currently waiting on
//! settles the entrance or completes the exit; anything else is stale.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Size;
//! use understory_presentation::config::PresentationConfig;
//! use understory_presentation::machine::{Effect, Event, PresentationStateMachine, Request};
//! use understory_presentation::types::{Completion, Geometry, VisibilityState};
//!
//! let now = Duration::ZERO;
//! let mut m = PresentationStateMachine::item_mode();
//! m.configure(now, PresentationConfig::default()).unwrap();
//! let _ = m.dispatch(now, Event::ContainerChanged(Geometry::new(Size::new(400.0, 800.0))));
//! let _ = m.dispatch(now, Event::Present(Request::Item(Some("saved"))));
//! let effects = m.dispatch(now, Event::ContentMeasured(Size::new(200.0, 60.0)));
//! let id = effects
//!     .iter()
//!     .find_map(|e| match e {
//!         Effect::Animate { id, .. } => Some(*id),
//!         _ => None,
//!     })
//!     .unwrap();
//! let _ = m.dispatch(now, Event::AnimationFinished(id, Completion::Finished));
//! assert_eq!(m.visibility(), VisibilityState::Shown);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::autohide::AutohideScheduler;
use crate::config::{ConfigError, PresentationConfig};
use crate::drag::{DragDismissController, DragOutcome, threshold};
use crate::gate::DismissGate;
use crate::placement::{OFFSCREEN, Placement, hidden_visual, is_measured, resting_visual};
use crate::types::{
    AnimationId, AppearAnimation, Completion, Curve, DismissSource, Geometry, Timing,
    VisibilityState, Visual,
};

/// Which kind of request drives a machine. Fixed at construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RequestMode {
    /// Driven by a boolean.
    Flag,
    /// Driven by the presence of an item.
    Item,
}

/// A show/hide intent from the presenting side.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request<T> {
    /// Flag-mode request: `true` shows, `false` hides.
    Flag(bool),
    /// Item-mode request: `Some` shows (or swaps) the item, `None` hides.
    Item(Option<T>),
}

impl<T> Request<T> {
    /// Mode this request belongs to.
    pub fn mode(&self) -> RequestMode {
        match self {
            Self::Flag(_) => RequestMode::Flag,
            Self::Item(_) => RequestMode::Item,
        }
    }

    /// True when the request asks for the overlay to be visible.
    pub fn is_show(&self) -> bool {
        match self {
            Self::Flag(shown) => *shown,
            Self::Item(item) => item.is_some(),
        }
    }
}

/// Input to [`PresentationStateMachine::dispatch`].
#[derive(Clone, Debug)]
pub enum Event<T> {
    /// Show or hide.
    Present(Request<T>),
    /// Flag-mode content provider.
    SetContent(Option<T>),
    /// Natural size of the content, reported by the rendering layer.
    ContentMeasured(Size),
    /// Container size or safe area changed.
    ContainerChanged(Geometry),
    /// An animation requested with [`Effect::Animate`] ended.
    AnimationFinished(AnimationId, Completion),
    /// The content was tapped.
    TapInside,
    /// The background around the content was tapped.
    TapOutside,
    /// A drag over the content moved; carries the total translation.
    DragChanged(Vec2),
    /// The drag over the content ended.
    DragEnded,
}

/// Output of the machine, to be applied by the rendering layer in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<T> {
    /// Mount the content.
    Mount(T),
    /// Replace the content of an already mounted overlay.
    UpdateContent(T),
    /// Unmount the content.
    Unmount,
    /// Jump to a visual without animating.
    SetVisual(Visual),
    /// Animate to a visual; report completion with `id`.
    Animate {
        /// Completion key.
        id: AnimationId,
        /// Target visual.
        target: Visual,
        /// Duration and curve.
        timing: Timing,
    },
    /// Geometry is known for this mount and the entrance has started.
    Positioned,
    /// A dismissal started.
    WillDismiss(DismissSource),
    /// A dismissal finished and the content is gone.
    Dismissed(DismissSource),
    /// The dismiss gate opened (`true`) or closed (`false`).
    DismissAllowedChanged(bool),
    /// The presenting flag or item should be cleared.
    ClearRequest,
}

/// Lifecycle state machine for one overlay.
///
/// See the [module docs](self) for the event/effect protocol.
pub struct PresentationStateMachine<T> {
    mode: RequestMode,
    config: Option<PresentationConfig>,
    state: VisibilityState,
    content: Option<T>,
    // Mounted copy kept for the exit after the item went nil or the provider was cleared.
    fading: Option<T>,
    geometry: Geometry,
    content_size: Size,
    positioned: bool,
    appear_anim: Option<AnimationId>,
    hide_anim: Option<AnimationId>,
    dismiss_source: Option<DismissSource>,
    next_anim: u64,
    visual: Visual,
    autohide: AutohideScheduler,
    gate: DismissGate,
    drag: DragDismissController,
}

impl<T> core::fmt::Debug for PresentationStateMachine<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PresentationStateMachine")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("positioned", &self.positioned)
            .field("has_content", &self.content.is_some())
            .field("fading", &self.fading.is_some())
            .field("geometry", &self.geometry)
            .field("content_size", &self.content_size)
            .field("visual", &self.visual)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> PresentationStateMachine<T> {
    /// Create an unconfigured machine in `mode`.
    ///
    /// Until [`configure`](Self::configure) is called, show requests are ignored.
    pub fn new(mode: RequestMode) -> Self {
        Self {
            mode,
            config: None,
            state: VisibilityState::Hidden,
            content: None,
            fading: None,
            geometry: Geometry::default(),
            content_size: Size::ZERO,
            positioned: false,
            appear_anim: None,
            hide_anim: None,
            dismiss_source: None,
            next_anim: 0,
            visual: Visual::at(OFFSCREEN),
            autohide: AutohideScheduler::new(),
            gate: DismissGate::new(None),
            drag: DragDismissController::new(),
        }
    }

    /// Shorthand for `new(RequestMode::Flag)`.
    pub fn flag_mode() -> Self {
        Self::new(RequestMode::Flag)
    }

    /// Shorthand for `new(RequestMode::Item)`.
    pub fn item_mode() -> Self {
        Self::new(RequestMode::Item)
    }

    /// Validate and store `config`.
    ///
    /// Placement and animation settings apply from the next transition or
    /// geometry change. A changed dismiss delay moves a pending unlock, counting
    /// from `now`.
    pub fn configure(
        &mut self,
        now: Duration,
        config: PresentationConfig,
    ) -> Result<(), ConfigError> {
        config.validate()?;
        if self.config.is_some() {
            self.gate.set_delay(now, config.dismissible_after);
        } else {
            self.gate = DismissGate::new(config.dismissible_after);
        }
        tracing::debug!(
            display_mode = ?config.display_mode,
            anchor = ?config.anchor,
            appear = ?config.appear_from,
            "presentation configured"
        );
        self.config = Some(config);
        Ok(())
    }

    /// Current configuration, if any.
    pub fn config(&self) -> Option<&PresentationConfig> {
        self.config.as_ref()
    }

    /// Request mode fixed at construction.
    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Logical visibility.
    pub fn visibility(&self) -> VisibilityState {
        self.state
    }

    /// True once geometry is known for the current mount.
    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// True while tap and drag dismissal are allowed.
    pub fn dismiss_allowed(&self) -> bool {
        self.gate.is_open()
    }

    /// True when background taps should not reach the views underneath.
    pub fn blocks_background(&self) -> bool {
        self.state.is_mounted() && self.config.as_ref().is_some_and(|c| !c.allow_tap_through)
    }

    /// Last container geometry.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Last measured content size (zero until measured for this mount).
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Last visual handed to the rendering layer.
    pub fn visual(&self) -> Visual {
        self.visual
    }

    /// Content currently on screen, including a fading item-mode copy.
    pub fn displayed_content(&self) -> Option<&T> {
        if self.state.is_mounted() {
            self.content.as_ref().or(self.fading.as_ref())
        } else {
            None
        }
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.autohide.deadline(), self.gate.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire due timers.
    pub fn poll(&mut self, now: Duration) -> Vec<Effect<T>> {
        let mut out = Vec::new();
        self.fire_due(now, &mut out);
        out
    }

    /// Handle one event and return the effects to apply, in order.
    ///
    /// Due timers fire first, so a tap at the same instant the dismiss gate
    /// unlocks is accepted.
    pub fn dispatch(&mut self, now: Duration, event: Event<T>) -> Vec<Effect<T>> {
        let mut out = Vec::new();
        self.fire_due(now, &mut out);
        match event {
            Event::Present(request) => self.present(now, request, &mut out),
            Event::SetContent(content) => self.set_content(content, &mut out),
            Event::ContentMeasured(size) => self.content_measured(now, size, &mut out),
            Event::ContainerChanged(geometry) => self.container_changed(now, geometry, &mut out),
            Event::AnimationFinished(id, completion) => {
                self.animation_finished(id, completion, &mut out);
            }
            Event::TapInside => self.tap(DismissSource::TapInside, &mut out),
            Event::TapOutside => self.tap(DismissSource::TapOutside, &mut out),
            Event::DragChanged(translation) => self.drag_changed(translation, &mut out),
            Event::DragEnded => self.drag_ended(&mut out),
        }
        out
    }

    fn present(&mut self, now: Duration, request: Request<T>, out: &mut Vec<Effect<T>>) {
        match (self.mode, request) {
            (RequestMode::Flag, Request::Flag(true)) => self.show(now, out),
            (RequestMode::Flag, Request::Flag(false)) => self.hide(DismissSource::Binding, out),
            (RequestMode::Item, Request::Item(Some(item))) => match self.state {
                VisibilityState::Hidden => {
                    self.content = Some(item);
                    self.show(now, out);
                }
                VisibilityState::Appearing | VisibilityState::Shown => {
                    self.content = Some(item.clone());
                    out.push(Effect::UpdateContent(item));
                }
                VisibilityState::Dismissing => {
                    self.fading = None;
                    self.content = Some(item.clone());
                    out.push(Effect::UpdateContent(item));
                    self.show(now, out);
                }
            },
            (RequestMode::Item, Request::Item(None)) => {
                if let Some(item) = self.content.take()
                    && self.state.is_mounted()
                {
                    self.fading = Some(item);
                }
                self.hide(DismissSource::Binding, out);
            }
            (mode, request) => {
                tracing::warn!(
                    ?mode,
                    request = ?request.mode(),
                    "request kind does not match the presentation mode; ignored"
                );
            }
        }
    }

    fn set_content(&mut self, content: Option<T>, out: &mut Vec<Effect<T>>) {
        if self.mode != RequestMode::Flag {
            tracing::warn!("content provider set on an item-mode presentation; ignored");
            return;
        }
        match content {
            Some(c) if self.state.is_mounted() => {
                self.content = Some(c.clone());
                self.fading = None;
                out.push(Effect::UpdateContent(c));
            }
            // Mounted content stays on screen until teardown.
            None if self.state.is_mounted() => {
                if let Some(c) = self.content.take() {
                    self.fading = Some(c);
                }
            }
            c => self.content = c,
        }
    }

    fn show(&mut self, now: Duration, out: &mut Vec<Effect<T>>) {
        if self.config.is_none() {
            tracing::warn!("show requested before configure; ignored");
            return;
        }
        match self.state {
            VisibilityState::Hidden => {
                let Some(content) = self.content.clone() else {
                    tracing::debug!("show without content; clearing the request");
                    out.push(Effect::ClearRequest);
                    return;
                };
                tracing::trace!("hidden -> appearing");
                self.state = VisibilityState::Appearing;
                self.positioned = false;
                out.push(Effect::Mount(content));
                if !self.try_position(now, out) {
                    self.set_visual(Visual::at(OFFSCREEN), out);
                }
            }
            VisibilityState::Appearing | VisibilityState::Shown => {
                tracing::trace!(state = ?self.state, "already presented");
            }
            VisibilityState::Dismissing => {
                tracing::debug!("show while dismissing; re-entering without unmount");
                self.hide_anim = None;
                self.dismiss_source = None;
                self.state = VisibilityState::Appearing;
                debug_assert!(self.positioned, "only positioned content animates out");
                self.animate_in(out);
                self.arm_timers(now, out);
            }
        }
    }

    fn hide(&mut self, source: DismissSource, out: &mut Vec<Effect<T>>) {
        match self.state {
            VisibilityState::Hidden | VisibilityState::Dismissing => {
                tracing::trace!(?source, state = ?self.state, "hide ignored");
            }
            VisibilityState::Appearing if !self.positioned => {
                tracing::debug!(?source, "hide before first layout; unmounting at once");
                out.push(Effect::WillDismiss(source));
                self.teardown(source, out);
            }
            VisibilityState::Appearing | VisibilityState::Shown => {
                tracing::debug!(?source, "dismissing");
                self.autohide.cancel();
                self.gate.cancel();
                self.drag.reset();
                self.appear_anim = None;
                self.state = VisibilityState::Dismissing;
                self.dismiss_source = Some(source);
                out.push(Effect::WillDismiss(source));
                let disappear = self
                    .config
                    .as_ref()
                    .map_or(AppearAnimation::None, PresentationConfig::disappear);
                let id = self.next_animation();
                self.hide_anim = Some(id);
                let target = self.hidden(disappear);
                self.animate(id, target, self.timing(), out);
            }
        }
    }

    fn teardown(&mut self, source: DismissSource, out: &mut Vec<Effect<T>>) {
        tracing::trace!(?source, "-> hidden");
        self.state = VisibilityState::Hidden;
        self.positioned = false;
        self.appear_anim = None;
        self.hide_anim = None;
        self.dismiss_source = None;
        self.autohide.cancel();
        self.drag.reset();
        self.content_size = Size::ZERO;
        self.fading = None;
        if self.mode == RequestMode::Item {
            self.content = None;
        }
        self.visual = Visual::at(OFFSCREEN);
        out.push(Effect::Unmount);
        out.push(Effect::Dismissed(source));
        if source != DismissSource::Binding {
            out.push(Effect::ClearRequest);
        }
        let was_open = self.gate.is_open();
        self.gate.reset();
        self.notify_gate(was_open, out);
    }

    // Starts the entrance once both container and content sizes are known.
    fn try_position(&mut self, now: Duration, out: &mut Vec<Effect<T>>) -> bool {
        if self.state != VisibilityState::Appearing
            || self.positioned
            || !is_measured(self.content_size)
            || !is_measured(self.geometry.size)
        {
            return false;
        }
        let Some(appear) = self.config.as_ref().map(|c| c.appear_from) else {
            return false;
        };
        tracing::trace!(size = ?self.content_size, "positioned");
        self.positioned = true;
        let start = self.hidden(appear);
        self.set_visual(start, out);
        out.push(Effect::Positioned);
        self.animate_in(out);
        self.arm_timers(now, out);
        true
    }

    fn arm_timers(&mut self, now: Duration, out: &mut Vec<Effect<T>>) {
        if let Some(config) = self.config.as_ref() {
            self.autohide.arm(now, config);
        }
        let was_open = self.gate.is_open();
        self.gate.arm(now);
        self.notify_gate(was_open, out);
    }

    fn notify_gate(&self, was_open: bool, out: &mut Vec<Effect<T>>) {
        let open = self.gate.is_open();
        if open != was_open {
            out.push(Effect::DismissAllowedChanged(open));
        }
    }

    fn animation_finished(
        &mut self,
        id: AnimationId,
        completion: Completion,
        out: &mut Vec<Effect<T>>,
    ) {
        if self.state == VisibilityState::Appearing && self.appear_anim == Some(id) {
            tracing::trace!(?completion, "appearing -> shown");
            self.appear_anim = None;
            self.state = VisibilityState::Shown;
        } else if self.state == VisibilityState::Dismissing && self.hide_anim == Some(id) {
            // Superseded or not, the exit is over and cleanup must run.
            let source = self.dismiss_source.unwrap_or(DismissSource::Binding);
            self.teardown(source, out);
        } else {
            tracing::trace!(id = id.get(), ?completion, "stale animation completion");
        }
    }

    fn content_measured(&mut self, now: Duration, size: Size, out: &mut Vec<Effect<T>>) {
        if !is_measured(size) {
            tracing::trace!(?size, "empty measurement ignored");
            return;
        }
        if size == self.content_size {
            return;
        }
        self.content_size = size;
        self.relayout(now, out);
    }

    fn container_changed(&mut self, now: Duration, geometry: Geometry, out: &mut Vec<Effect<T>>) {
        if !is_measured(geometry.size) {
            tracing::trace!(size = ?geometry.size, "empty container ignored");
            return;
        }
        if geometry == self.geometry {
            return;
        }
        self.geometry = geometry;
        self.relayout(now, out);
    }

    fn relayout(&mut self, now: Duration, out: &mut Vec<Effect<T>>) {
        match self.state {
            VisibilityState::Hidden | VisibilityState::Dismissing => {}
            VisibilityState::Appearing if !self.positioned => {
                let _ = self.try_position(now, out);
            }
            VisibilityState::Appearing => self.animate_in(out),
            VisibilityState::Shown => {
                if !self.drag.is_dragging() {
                    let target = self.resting();
                    self.set_visual(target, out);
                }
            }
        }
    }

    fn is_interactive(&self) -> bool {
        self.positioned
            && matches!(
                self.state,
                VisibilityState::Appearing | VisibilityState::Shown
            )
    }

    fn tap(&mut self, source: DismissSource, out: &mut Vec<Effect<T>>) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let enabled = match source {
            DismissSource::TapInside => config.close_on_tap_inside,
            _ => config.close_on_tap_outside,
        };
        if !enabled || !self.is_interactive() {
            tracing::trace!(?source, "tap does not dismiss");
            return;
        }
        if !self.gate.is_open() {
            tracing::debug!(?source, "dismiss gate closed; tap refused");
            return;
        }
        self.hide(source, out);
    }

    fn drag_changed(&mut self, translation: Vec2, out: &mut Vec<Effect<T>>) {
        let Some((enabled, appear)) = self
            .config
            .as_ref()
            .map(|c| (c.drag_to_dismiss, c.appear_from))
        else {
            return;
        };
        if !enabled || !self.is_interactive() {
            return;
        }
        let offset = self.drag.update(appear, translation);
        let resting = self.resting();
        self.set_visual(
            Visual {
                offset: resting.offset + offset,
                ..resting
            },
            out,
        );
    }

    fn drag_ended(&mut self, out: &mut Vec<Effect<T>>) {
        if !self.drag.is_dragging() {
            return;
        }
        let Some((appear, explicit)) = self
            .config
            .as_ref()
            .map(|c| (c.appear_from, c.drag_distance))
        else {
            self.drag.reset();
            return;
        };
        let limit = threshold(appear, self.content_size, explicit);
        match self.drag.end(appear, limit) {
            DragOutcome::Dismiss(DismissSource::Drag) if !self.gate.is_open() => {
                tracing::debug!("dismiss gate closed; drag springs back");
                self.spring_back(out);
            }
            DragOutcome::Dismiss(source) => self.hide(source, out),
            DragOutcome::SpringBack => self.spring_back(out),
        }
    }

    fn spring_back(&mut self, out: &mut Vec<Effect<T>>) {
        let id = self.next_animation();
        if self.state == VisibilityState::Appearing {
            self.appear_anim = Some(id);
        }
        let target = self.resting();
        let timing = Timing {
            curve: Curve::Spring,
            ..self.timing()
        };
        self.animate(id, target, timing, out);
    }

    fn fire_due(&mut self, now: Duration, out: &mut Vec<Effect<T>>) {
        if self.gate.poll(now) {
            tracing::trace!("dismiss gate opened");
            out.push(Effect::DismissAllowedChanged(true));
        }
        if self.autohide.poll(now) {
            if self.drag.is_dragging() {
                tracing::debug!("autohide fired during drag; deferred to drag end");
                self.drag.defer_autohide();
            } else {
                self.hide(DismissSource::Autohide, out);
            }
        }
    }

    fn animate_in(&mut self, out: &mut Vec<Effect<T>>) {
        let id = self.next_animation();
        self.appear_anim = Some(id);
        let target = self.resting();
        self.animate(id, target, self.timing(), out);
    }

    fn animate(&mut self, id: AnimationId, target: Visual, timing: Timing, out: &mut Vec<Effect<T>>) {
        self.visual = target;
        out.push(Effect::Animate { id, target, timing });
    }

    fn set_visual(&mut self, visual: Visual, out: &mut Vec<Effect<T>>) {
        self.visual = visual;
        out.push(Effect::SetVisual(visual));
    }

    fn next_animation(&mut self) -> AnimationId {
        let id = AnimationId(self.next_anim);
        self.next_anim += 1;
        id
    }

    fn timing(&self) -> Timing {
        self.config.as_ref().map(|c| c.timing).unwrap_or_default()
    }

    fn resting(&self) -> Visual {
        match self.config.as_ref() {
            Some(c) => resting_visual(&Placement::from(c), &self.geometry, self.content_size),
            None => Visual::at(OFFSCREEN),
        }
    }

    fn hidden(&self, animation: AppearAnimation) -> Visual {
        match self.config.as_ref() {
            Some(c) => hidden_visual(
                animation,
                &Placement::from(c),
                &self.geometry,
                self.content_size,
            ),
            None => Visual::at(OFFSCREEN),
        }
    }
}
