// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hosting strategies, observers, and the [`Presenter`] driver.
//!
//! ## Overview
//!
//! A [`HostingStrategy`] is the rendering side: it mounts content in one
//! [`DisplayMode`] (in place, in a sheet, or in its own window), moves and
//! animates it, and reports the container geometry it can see. An
//! [`Observer`] receives lifecycle callbacks.
//!
//! [`Presenter`] ties a [`PresentationStateMachine`] to one host and any number
//! of observers: it dispatches events, applies the returned effects in order,
//! and pulls geometry from the host when content is mounted. Everything still
//! happens on the caller's context and nothing reads a clock.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Size;
//! use understory_presentation::config::PresentationConfig;
//! use understory_presentation::host::{HostingStrategy, Presenter};
//! use understory_presentation::machine::{Request, RequestMode};
//! use understory_presentation::types::{
//!     AnimationId, Completion, DisplayMode, Geometry, Timing, VisibilityState, Visual,
//! };
//!
//! #[derive(Default)]
//! struct Screen {
//!     mounted: Option<&'static str>,
//!     last: Option<AnimationId>,
//! }
//!
//! impl HostingStrategy<&'static str> for Screen {
//!     fn display_mode(&self) -> DisplayMode { DisplayMode::Overlay }
//!     fn mount(&mut self, content: &&'static str) { self.mounted = Some(*content); }
//!     fn update(&mut self, content: &&'static str) { self.mounted = Some(*content); }
//!     fn unmount(&mut self) { self.mounted = None; }
//!     fn set_visual(&mut self, _: Visual) {}
//!     fn animate(&mut self, id: AnimationId, _: Visual, _: Timing) { self.last = Some(id); }
//!     fn report_geometry(&self) -> Option<Geometry> {
//!         Some(Geometry::new(Size::new(390.0, 844.0)))
//!     }
//! }
//!
//! let now = Duration::ZERO;
//! let mut p = Presenter::new(RequestMode::Item, Screen::default());
//! p.configure(now, PresentationConfig::default()).unwrap();
//! p.present(now, Request::Item(Some("copied")));
//! p.content_measured(now, Size::new(160.0, 44.0));
//! let id = p.host().last.unwrap();
//! p.animation_finished(now, id, Completion::Finished);
//! assert_eq!(p.machine().visibility(), VisibilityState::Shown);
//! assert_eq!(p.host().mounted, Some("copied"));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::config::{ConfigError, PresentationConfig};
use crate::machine::{Effect, Event, PresentationStateMachine, Request, RequestMode};
use crate::types::{AnimationId, Completion, DismissSource, DisplayMode, Geometry, Timing, Visual};

/// The rendering side of one overlay.
///
/// One implementation per [`DisplayMode`]: overlay hosts mount above the
/// presenting view, sheet hosts inside a transparent modal, window hosts in a
/// dedicated top-level window.
pub trait HostingStrategy<T> {
    /// Mode this host mounts in.
    fn display_mode(&self) -> DisplayMode;

    /// Mount `content`. Called once per presentation cycle.
    fn mount(&mut self, content: &T);

    /// Replace the mounted content.
    fn update(&mut self, content: &T);

    /// Remove the mounted content.
    fn unmount(&mut self);

    /// Jump to `visual` without animating.
    fn set_visual(&mut self, visual: Visual);

    /// Animate to `target`.
    ///
    /// The host must report back exactly once with
    /// [`Presenter::animation_finished`] for every id, passing
    /// [`Completion::Superseded`] when a later request interrupted it.
    fn animate(&mut self, id: AnimationId, target: Visual, timing: Timing);

    /// Container geometry, once known.
    fn report_geometry(&self) -> Option<Geometry>;
}

/// Lifecycle callbacks. Every method defaults to doing nothing.
pub trait Observer {
    /// Geometry became known for this mount.
    fn positioned(&mut self) {}

    /// A dismissal started.
    fn will_dismiss(&mut self, _source: DismissSource) {}

    /// A dismissal finished.
    fn dismissed(&mut self, _source: DismissSource) {}

    /// The dismiss gate opened or closed.
    fn dismiss_allowed_changed(&mut self, _allowed: bool) {}

    /// The presenting flag or item should be cleared.
    fn clear_request(&mut self) {}
}

/// Drives a [`PresentationStateMachine`] against one [`HostingStrategy`].
pub struct Presenter<T, H> {
    machine: PresentationStateMachine<T>,
    host: H,
    observers: Vec<Box<dyn Observer>>,
}

impl<T, H: core::fmt::Debug> core::fmt::Debug for Presenter<T, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Presenter")
            .field("machine", &self.machine)
            .field("host", &self.host)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T: Clone, H: HostingStrategy<T>> Presenter<T, H> {
    /// Create an unconfigured presenter.
    pub fn new(mode: RequestMode, host: H) -> Self {
        Self {
            machine: PresentationStateMachine::new(mode),
            host,
            observers: Vec::new(),
        }
    }

    /// Validate and apply `config`.
    ///
    /// Fails when the configured display mode is not the one the host mounts in.
    pub fn configure(
        &mut self,
        now: Duration,
        config: PresentationConfig,
    ) -> Result<(), ConfigError> {
        let host = self.host.display_mode();
        if config.display_mode != host {
            return Err(ConfigError::UnsupportedDisplayMode {
                requested: config.display_mode,
                host,
            });
        }
        self.machine.configure(now, config)?;
        self.sync_geometry(now);
        Ok(())
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Underlying state machine.
    pub fn machine(&self) -> &PresentationStateMachine<T> {
        &self.machine
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Earliest pending timer deadline; call [`poll`](Self::poll) then.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.machine.next_deadline()
    }

    /// Show or hide.
    pub fn present(&mut self, now: Duration, request: Request<T>) {
        self.dispatch(now, Event::Present(request));
    }

    /// Set the flag-mode content provider.
    pub fn set_content(&mut self, now: Duration, content: Option<T>) {
        self.dispatch(now, Event::SetContent(content));
    }

    /// Report the natural size of the mounted content.
    pub fn content_measured(&mut self, now: Duration, size: Size) {
        self.dispatch(now, Event::ContentMeasured(size));
    }

    /// Report the end of an animation started by [`HostingStrategy::animate`].
    pub fn animation_finished(&mut self, now: Duration, id: AnimationId, completion: Completion) {
        self.dispatch(now, Event::AnimationFinished(id, completion));
    }

    /// Forward a tap on the content.
    pub fn tap_inside(&mut self, now: Duration) {
        self.dispatch(now, Event::TapInside);
    }

    /// Forward a tap on the background.
    pub fn tap_outside(&mut self, now: Duration) {
        self.dispatch(now, Event::TapOutside);
    }

    /// Forward drag movement; `translation` is the total since the drag began.
    pub fn drag_changed(&mut self, now: Duration, translation: Vec2) {
        self.dispatch(now, Event::DragChanged(translation));
    }

    /// Forward the end of a drag.
    pub fn drag_ended(&mut self, now: Duration) {
        self.dispatch(now, Event::DragEnded);
    }

    /// Pull geometry from the host and forward it if it changed.
    ///
    /// Call after the host's container resizes or its safe area changes.
    pub fn sync_geometry(&mut self, now: Duration) {
        if let Some(geometry) = self.host.report_geometry()
            && geometry != self.machine.geometry()
        {
            self.dispatch(now, Event::ContainerChanged(geometry));
        }
    }

    /// Fire due timers.
    pub fn poll(&mut self, now: Duration) {
        let effects = self.machine.poll(now);
        self.apply(now, effects);
    }

    /// Dispatch any event and apply the result.
    pub fn dispatch(&mut self, now: Duration, event: Event<T>) {
        let effects = self.machine.dispatch(now, event);
        self.apply(now, effects);
    }

    fn apply(&mut self, now: Duration, effects: Vec<Effect<T>>) {
        let mut mounted = false;
        for effect in effects {
            match effect {
                Effect::Mount(content) => {
                    self.host.mount(&content);
                    mounted = true;
                }
                Effect::UpdateContent(content) => self.host.update(&content),
                Effect::Unmount => self.host.unmount(),
                Effect::SetVisual(visual) => self.host.set_visual(visual),
                Effect::Animate { id, target, timing } => self.host.animate(id, target, timing),
                Effect::Positioned => self.notify(|o| o.positioned()),
                Effect::WillDismiss(source) => self.notify(|o| o.will_dismiss(source)),
                Effect::Dismissed(source) => self.notify(|o| o.dismissed(source)),
                Effect::DismissAllowedChanged(allowed) => {
                    self.notify(|o| o.dismiss_allowed_changed(allowed));
                }
                Effect::ClearRequest => self.notify(|o| o.clear_request()),
            }
        }
        // Window and sheet hosts only learn their container once mounted.
        if mounted {
            self.sync_geometry(now);
        }
    }

    fn notify(&mut self, mut f: impl FnMut(&mut dyn Observer)) {
        for observer in &mut self.observers {
            f(observer.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use crate::types::VisibilityState;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Mount(&'static str),
        Update(&'static str),
        Unmount,
        SetVisual,
        Animate(AnimationId),
    }

    #[derive(Debug)]
    struct RecordingHost {
        mode: DisplayMode,
        geometry: Option<Geometry>,
        // Geometry that only becomes visible after mounting.
        on_mount: Option<Geometry>,
        calls: Vec<Call>,
    }

    impl RecordingHost {
        fn overlay() -> Self {
            Self {
                mode: DisplayMode::Overlay,
                geometry: Some(Geometry::new(Size::new(400.0, 800.0))),
                on_mount: None,
                calls: Vec::new(),
            }
        }

        fn window() -> Self {
            Self {
                mode: DisplayMode::Window,
                geometry: None,
                on_mount: Some(Geometry::new(Size::new(400.0, 800.0))),
                calls: Vec::new(),
            }
        }

        fn last_animation(&self) -> AnimationId {
            self.calls
                .iter()
                .rev()
                .find_map(|c| match c {
                    Call::Animate(id) => Some(*id),
                    _ => None,
                })
                .unwrap()
        }
    }

    impl HostingStrategy<&'static str> for RecordingHost {
        fn display_mode(&self) -> DisplayMode {
            self.mode
        }

        fn mount(&mut self, content: &&'static str) {
            if let Some(g) = self.on_mount {
                self.geometry = Some(g);
            }
            self.calls.push(Call::Mount(content));
        }

        fn update(&mut self, content: &&'static str) {
            self.calls.push(Call::Update(content));
        }

        fn unmount(&mut self) {
            self.calls.push(Call::Unmount);
        }

        fn set_visual(&mut self, _visual: Visual) {
            self.calls.push(Call::SetVisual);
        }

        fn animate(&mut self, id: AnimationId, _target: Visual, _timing: Timing) {
            self.calls.push(Call::Animate(id));
        }

        fn report_geometry(&self) -> Option<Geometry> {
            self.geometry
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Note {
        Positioned,
        WillDismiss(DismissSource),
        Dismissed(DismissSource),
        Allowed(bool),
        Clear,
    }

    struct Log(Rc<RefCell<Vec<Note>>>);

    impl Observer for Log {
        fn positioned(&mut self) {
            self.0.borrow_mut().push(Note::Positioned);
        }
        fn will_dismiss(&mut self, source: DismissSource) {
            self.0.borrow_mut().push(Note::WillDismiss(source));
        }
        fn dismissed(&mut self, source: DismissSource) {
            self.0.borrow_mut().push(Note::Dismissed(source));
        }
        fn dismiss_allowed_changed(&mut self, allowed: bool) {
            self.0.borrow_mut().push(Note::Allowed(allowed));
        }
        fn clear_request(&mut self) {
            self.0.borrow_mut().push(Note::Clear);
        }
    }

    const CONTENT: Size = Size::new(300.0, 100.0);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn presenter(
        host: RecordingHost,
        config: PresentationConfig,
    ) -> (Presenter<&'static str, RecordingHost>, Rc<RefCell<Vec<Note>>>) {
        let notes = Rc::new(RefCell::new(Vec::new()));
        let mut p = Presenter::new(RequestMode::Flag, host);
        p.add_observer(Box::new(Log(notes.clone())));
        p.configure(ms(0), config).unwrap();
        p.set_content(ms(0), Some("toast"));
        (p, notes)
    }

    // Full cycle: host calls and observer callbacks arrive in order.
    #[test]
    fn full_cycle_order() {
        let (mut p, notes) = presenter(RecordingHost::overlay(), PresentationConfig::default());
        p.present(ms(0), Request::Flag(true));
        p.content_measured(ms(0), CONTENT);
        let appear = p.host().last_animation();
        p.animation_finished(ms(300), appear, Completion::Finished);
        assert_eq!(p.machine().visibility(), VisibilityState::Shown);

        p.present(ms(1000), Request::Flag(false));
        let hide = p.host().last_animation();
        assert_eq!(p.host().calls.last(), Some(&Call::Animate(hide)));
        p.animation_finished(ms(1300), hide, Completion::Finished);

        assert_eq!(
            p.host().calls,
            vec![
                Call::Mount("toast"),
                Call::SetVisual,
                Call::SetVisual,
                Call::Animate(appear),
                Call::Animate(hide),
                Call::Unmount,
            ]
        );
        assert_eq!(
            *notes.borrow(),
            vec![
                Note::Positioned,
                Note::WillDismiss(DismissSource::Binding),
                Note::Dismissed(DismissSource::Binding),
            ]
        );
    }

    // A window host reports geometry only once mounted; pre-measured content
    // positions as soon as that geometry is pulled.
    #[test]
    fn window_host_geometry_after_mount() {
        let config = PresentationConfig::default().with_display_mode(DisplayMode::Window);
        let (mut p, notes) = presenter(RecordingHost::window(), config);
        p.content_measured(ms(0), CONTENT);
        assert!(!p.machine().is_positioned());
        p.present(ms(0), Request::Flag(true));
        assert!(p.machine().is_positioned());
        assert_eq!(*notes.borrow(), vec![Note::Positioned]);
        assert!(matches!(p.host().calls.last(), Some(Call::Animate(_))));
    }

    #[test]
    fn display_mode_must_match_host() {
        let mut p: Presenter<&'static str, _> =
            Presenter::new(RequestMode::Flag, RecordingHost::overlay());
        let err = p
            .configure(
                ms(0),
                PresentationConfig::default().with_display_mode(DisplayMode::Sheet),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedDisplayMode {
                requested: DisplayMode::Sheet,
                host: DisplayMode::Overlay,
            }
        );
        assert!(p.machine().config().is_none());
    }

    // Autohide reaches observers as will-dismiss, dismissed, then a clear request.
    #[test]
    fn autohide_notifies_observers() {
        let config = PresentationConfig::default().with_autohide(Duration::from_secs(1));
        let (mut p, notes) = presenter(RecordingHost::overlay(), config);
        p.present(ms(0), Request::Flag(true));
        p.content_measured(ms(0), CONTENT);
        assert_eq!(p.next_deadline(), Some(Duration::from_secs(1)));
        p.poll(Duration::from_secs(1));
        let hide = p.host().last_animation();
        p.animation_finished(ms(1300), hide, Completion::Finished);
        assert_eq!(
            *notes.borrow(),
            vec![
                Note::Positioned,
                Note::WillDismiss(DismissSource::Autohide),
                Note::Dismissed(DismissSource::Autohide),
                Note::Clear,
            ]
        );
    }

    #[test]
    fn gate_changes_reach_observers() {
        let config = PresentationConfig::default()
            .with_dismissible_after(ms(500))
            .with_close_on_tap_inside(true);
        let (mut p, notes) = presenter(RecordingHost::overlay(), config);
        p.present(ms(0), Request::Flag(true));
        p.content_measured(ms(0), CONTENT);
        p.tap_inside(ms(100));
        assert_eq!(p.machine().visibility(), VisibilityState::Appearing);
        p.tap_inside(ms(600));
        assert_eq!(
            *notes.borrow(),
            vec![
                Note::Positioned,
                Note::Allowed(true),
                Note::WillDismiss(DismissSource::TapInside),
            ]
        );
    }

    // Swapping the flag-mode content while shown updates in place.
    #[test]
    fn content_swap_updates_host() {
        let (mut p, _) = presenter(RecordingHost::overlay(), PresentationConfig::default());
        p.present(ms(0), Request::Flag(true));
        p.set_content(ms(10), Some("updated"));
        assert_eq!(p.host().calls.last(), Some(&Call::Update("updated")));
        assert_eq!(p.machine().displayed_content(), Some(&"updated"));
    }
}
