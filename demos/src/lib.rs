// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the presentation demos: a printing host and logging setup.

use std::fmt::Debug;

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use understory_presentation::types::{
    AnimationId, Completion, DisplayMode, Geometry, Timing, Visual,
};

/// Install a `fmt` subscriber honoring `RUST_LOG` (default `debug`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// A host that prints what a renderer would do and keeps the animations it
/// was asked to run until the demo completes them.
#[derive(Debug)]
pub struct TerminalHost<T> {
    mode: DisplayMode,
    container: Geometry,
    /// Content currently mounted.
    pub mounted: Option<T>,
    /// Last visual set or animated to.
    pub visual: Option<Visual>,
    /// Number of mounts so far.
    pub mounts: usize,
    /// Number of unmounts so far.
    pub unmounts: usize,
    running: Vec<AnimationId>,
}

impl<T> TerminalHost<T> {
    /// A phone-sized overlay host.
    pub fn phone() -> Self {
        Self {
            mode: DisplayMode::Overlay,
            container: Geometry::new(Size::new(390.0, 844.0))
                .with_safe_area(kurbo::Insets::new(0.0, 47.0, 0.0, 34.0)),
            mounted: None,
            visual: None,
            mounts: 0,
            unmounts: 0,
            running: Vec::new(),
        }
    }

    /// Settle every running animation: the last one finishes, earlier ones
    /// were superseded by it.
    pub fn settle(&mut self) -> Vec<(AnimationId, Completion)> {
        let last = self.running.len().saturating_sub(1);
        self.running
            .drain(..)
            .enumerate()
            .map(|(i, id)| {
                let completion = if i == last {
                    Completion::Finished
                } else {
                    Completion::Superseded
                };
                (id, completion)
            })
            .collect()
    }
}

impl<T: Clone + Debug> understory_presentation::host::HostingStrategy<T> for TerminalHost<T> {
    fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    fn mount(&mut self, content: &T) {
        println!("  host: mount {content:?}");
        self.mounted = Some(content.clone());
        self.mounts += 1;
    }

    fn update(&mut self, content: &T) {
        println!("  host: update {content:?}");
        self.mounted = Some(content.clone());
    }

    fn unmount(&mut self) {
        println!("  host: unmount");
        self.mounted = None;
        self.unmounts += 1;
    }

    fn set_visual(&mut self, visual: Visual) {
        println!("  host: set {:?}", visual.offset);
        self.visual = Some(visual);
    }

    fn animate(&mut self, id: AnimationId, target: Visual, timing: Timing) {
        println!(
            "  host: animate #{} to {:?} over {:?}",
            id.get(),
            target.offset,
            timing.duration
        );
        self.visual = Some(target);
        self.running.push(id);
    }

    fn report_geometry(&self) -> Option<Geometry> {
        Some(self.container)
    }
}
