// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer loops: drain the workbench on a fixed tick and print.

use std::io::Write;
use std::time::Duration;

use oneclick_engine::{Signal, StatusEvent, Workbench};

use crate::color;

pub fn print_event(event: &StatusEvent) {
    println!("{}", color::status_line(&event.line, event.signal));
}

pub fn print_events(events: &[StatusEvent]) {
    for event in events {
        print_event(event);
    }
    let _ = std::io::stdout().flush();
}

/// What the build phase produced, as seen from its status lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    pub succeeded: bool,
    pub failed: bool,
}

/// Print build output until the workbench leaves the building state.
pub async fn follow_build(bench: &mut Workbench, tick: Duration) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    loop {
        let events = bench.drain();
        for event in &events {
            match event.signal {
                Some(Signal::BuildSucceeded) => outcome.succeeded = true,
                Some(s) if s.is_failure() => outcome.failed = true,
                _ => {}
            }
        }
        print_events(&events);
        if !bench.is_building() {
            return outcome;
        }
        tokio::time::sleep(tick).await;
    }
}

/// How the run phase ended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub interrupted: bool,
    pub errored: bool,
}

/// Print application output until it finishes or is stopped.
///
/// The first Ctrl-C stops the application tree; draining continues until the
/// stop line arrives.
pub async fn follow_run(bench: &mut Workbench, tick: Duration) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let events = bench.drain();
        let mut ended = false;
        for event in &events {
            match event.signal {
                Some(Signal::Error | Signal::CriticalError) => outcome.errored = true,
                Some(s) if s.ends_run() => ended = true,
                _ => {}
            }
        }
        print_events(&events);
        if ended {
            return outcome;
        }

        tokio::select! {
            _ = tokio::time::sleep(tick) => {}
            _ = &mut ctrl_c, if !outcome.interrupted => {
                tracing::info!("interrupted, stopping application");
                outcome.interrupted = true;
                bench.stop_app().await;
            }
        }
    }
}
