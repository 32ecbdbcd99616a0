// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swapping items while the previous one fades out.
//!
//! Item A is shown, cleared, and replaced by item B 50 ms later. B reuses the
//! mounted overlay: there is no frame with nothing mounted.
//!
//! Run:
//! - `cargo run -p understory_presentation_demos --example item_swap`

use std::time::Duration;

use kurbo::Size;
use understory_presentation::config::PresentationConfig;
use understory_presentation::host::Presenter;
use understory_presentation::machine::{Request, RequestMode};
use understory_presentation::types::{Anchor, AppearAnimation, VisibilityState};
use understory_presentation_demos::{TerminalHost, init_tracing};

#[derive(Clone, Debug, PartialEq)]
struct Banner {
    title: &'static str,
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn main() {
    init_tracing();

    let mut p = Presenter::new(RequestMode::Item, TerminalHost::phone());
    p.configure(
        ms(0),
        PresentationConfig::default()
            .with_anchor(Anchor::TOP)
            .with_appear(AppearAnimation::TopSlide),
    )
    .expect("valid configuration");

    println!("== show A ==");
    p.present(ms(0), Request::Item(Some(Banner { title: "A" })));
    p.content_measured(ms(16), Size::new(358.0, 72.0));
    for (id, completion) in p.host_mut().settle() {
        p.animation_finished(ms(316), id, completion);
    }
    assert_eq!(p.machine().visibility(), VisibilityState::Shown);

    println!("== clear, then B 50 ms later ==");
    p.present(ms(1000), Request::Item(None));
    assert_eq!(p.machine().visibility(), VisibilityState::Dismissing);
    assert_eq!(p.host().mounted, Some(Banner { title: "A" }));
    p.present(ms(1050), Request::Item(Some(Banner { title: "B" })));
    assert_eq!(p.host().mounted, Some(Banner { title: "B" }));

    for (id, completion) in p.host_mut().settle() {
        println!("  completion #{} {:?}", id.get(), completion);
        p.animation_finished(ms(1350), id, completion);
    }

    assert_eq!(p.machine().visibility(), VisibilityState::Shown);
    assert_eq!(p.host().mounts, 1);
    assert_eq!(p.host().unmounts, 0);
    println!("done: showing {:?}", p.host().mounted);
}
