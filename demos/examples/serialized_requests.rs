// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Requests from worker threads, applied in order on the driving thread.
//!
//! Two workers send show/hide requests through cloned handles while the main
//! thread pumps the serializer once per frame.
//!
//! Run:
//! - `cargo run -p understory_presentation_demos --example serialized_requests`

use std::thread;
use std::time::Duration;

use kurbo::Size;
use understory_presentation::config::PresentationConfig;
use understory_presentation::host::Presenter;
use understory_presentation::machine::{Request, RequestMode};
use understory_presentation::serializer::{Clock, EventSerializer, MonotonicClock};
use understory_presentation::types::VisibilityState;
use understory_presentation_demos::{TerminalHost, init_tracing};

fn main() {
    init_tracing();

    let clock = MonotonicClock::new();
    let mut p = Presenter::new(RequestMode::Flag, TerminalHost::phone());
    p.configure(clock.now(), PresentationConfig::default())
        .expect("valid configuration");
    p.set_content(clock.now(), Some("Syncing…"));
    p.content_measured(clock.now(), Size::new(200.0, 48.0));
    let mut serializer = EventSerializer::new(p);

    let workers: Vec<_> = (0..2)
        .map(|worker| {
            let handle = serializer.handle();
            thread::spawn(move || {
                for _ in 0..3 {
                    handle.present(Request::Flag(true)).expect("actor alive");
                    handle.present(Request::Flag(false)).expect("actor alive");
                }
                handle.present(Request::Flag(true)).expect("actor alive");
                println!("  worker {worker}: done");
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    let applied = serializer.pump(clock.now());
    println!("== applied {applied} requests ==");
    assert_eq!(applied, 14);

    let now = clock.now();
    let presenter = serializer.presenter_mut();
    for (id, completion) in presenter.host_mut().settle() {
        presenter.animation_finished(now, id, completion);
    }
    assert_eq!(presenter.machine().visibility(), VisibilityState::Shown);
    assert_eq!(presenter.host().mounts, 1);
    assert_eq!(presenter.host().unmounts, 0);
    println!("done: one mount for {applied} requests");
}
