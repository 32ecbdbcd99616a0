// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A bottom toast that hides itself.
//!
//! Shows a flag-driven toast with a 2 s autohide and a 1 s dismiss gate, taps
//! the background too early (refused), then lets the autohide run.
//!
//! Run:
//! - `cargo run -p understory_presentation_demos --example toast_autohide`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Insets, Size};
use understory_presentation::config::PresentationConfig;
use understory_presentation::host::{Observer, Presenter};
use understory_presentation::machine::{Request, RequestMode};
use understory_presentation::types::{DismissSource, VisibilityState};
use understory_presentation_demos::{TerminalHost, init_tracing};

#[derive(Default)]
struct Flag {
    shown: bool,
    dismissed_by: Option<DismissSource>,
}

struct Binding(Rc<RefCell<Flag>>);

impl Observer for Binding {
    fn dismissed(&mut self, source: DismissSource) {
        self.0.borrow_mut().dismissed_by = Some(source);
    }

    fn clear_request(&mut self) {
        println!("  observer: clearing the flag");
        self.0.borrow_mut().shown = false;
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn settle(p: &mut Presenter<&'static str, TerminalHost<&'static str>>, now: Duration) {
    for (id, completion) in p.host_mut().settle() {
        p.animation_finished(now, id, completion);
    }
}

fn main() {
    init_tracing();

    let flag = Rc::new(RefCell::new(Flag::default()));
    let mut p = Presenter::new(RequestMode::Flag, TerminalHost::phone());
    p.add_observer(Box::new(Binding(flag.clone())));
    p.configure(
        ms(0),
        PresentationConfig::default()
            .with_autohide(Duration::from_secs(2))
            .with_dismissible_after(Duration::from_secs(1))
            .with_close_on_tap_outside(true)
            .with_padding(Insets::new(16.0, 0.0, 16.0, 12.0)),
    )
    .expect("valid configuration");
    p.set_content(ms(0), Some("Message sent"));

    println!("== t=0: show ==");
    flag.borrow_mut().shown = true;
    p.present(ms(0), Request::Flag(true));
    p.content_measured(ms(16), Size::new(358.0, 56.0));
    settle(&mut p, ms(316));
    assert_eq!(p.machine().visibility(), VisibilityState::Shown);

    println!("== t=0.5s: background tap (gate still closed) ==");
    p.tap_outside(ms(500));
    assert_eq!(p.machine().visibility(), VisibilityState::Shown);

    println!("== waiting for autohide ==");
    let deadline = p.next_deadline().expect("timers armed");
    p.poll(deadline);
    let deadline = p.next_deadline().expect("autohide armed");
    assert_eq!(deadline, ms(16) + Duration::from_secs(2));
    p.poll(deadline);
    assert_eq!(p.machine().visibility(), VisibilityState::Dismissing);
    settle(&mut p, deadline + ms(300));

    assert_eq!(p.machine().visibility(), VisibilityState::Hidden);
    assert_eq!(p.host().mounts, 1);
    assert_eq!(p.host().unmounts, 1);
    let flag = flag.borrow();
    assert!(!flag.shown);
    assert_eq!(flag.dismissed_by, Some(DismissSource::Autohide));
    println!("done: dismissed by {:?}", flag.dismissed_by);
}
