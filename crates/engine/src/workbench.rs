// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer-side state: one build at a time, one application at a time.
//!
//! The consumer owns a [`Workbench`], submits work through it, and calls
//! [`Workbench::drain`] on its own tick. All state transitions driven by
//! worker output happen inside `drain`. A build stays in flight until its
//! supervisor task has finished and every line it pushed has been drained.

use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::channel::StatusChannel;
use crate::runner::ApplicationRunner;
use crate::signal::Signal;
use crate::supervisor::{BuildRequest, ProcessSupervisor};

/// One drained status line with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub line: String,
    pub signal: Option<Signal>,
}

pub struct Workbench {
    channel: StatusChannel,
    supervisor: ProcessSupervisor,
    runner: ApplicationRunner,
    /// Supervisor task of the build in flight.
    build: Option<JoinHandle<()>>,
    /// Request of the build in flight or last finished.
    request: Option<BuildRequest>,
    /// Set only by a success sentinel from the current build.
    executable: Option<PathBuf>,
}

impl Workbench {
    pub fn new(supervisor: ProcessSupervisor) -> Self {
        Self {
            channel: StatusChannel::new(),
            supervisor,
            runner: ApplicationRunner::new(),
            build: None,
            request: None,
            executable: None,
        }
    }

    pub fn is_building(&self) -> bool {
        self.build.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Use an already built artifact instead of building one.
    pub fn set_executable(&mut self, path: impl Into<PathBuf>) {
        self.executable = Some(path.into());
    }

    pub fn runner(&self) -> &ApplicationRunner {
        &self.runner
    }

    /// Start a build.
    ///
    /// Ignored while a build is in flight. Otherwise any running application
    /// is stopped and the previous executable forgotten before the request
    /// is validated, so a rejected request still leaves nothing runnable.
    /// Returns whether a build was started.
    pub async fn submit_build(&mut self, request: BuildRequest) -> bool {
        if self.is_building() {
            debug!("build already in progress, ignoring request");
            return false;
        }
        self.stop_app().await;
        self.executable = None;

        if request.project_dir.as_os_str().is_empty() || request.artifact_name.is_empty() {
            self.channel
                .sink()
                .error("Project Path and Executable Name are required.");
            return false;
        }

        self.request = Some(request.clone());
        self.build = Some(self.supervisor.spawn(request, self.channel.sink()));
        true
    }

    /// Run the last successfully built executable with `args`.
    ///
    /// Refused while a build is in flight.
    pub fn start_app(&self, args: &[String]) -> Option<JoinHandle<()>> {
        if self.is_building() {
            self.channel.sink().info("A build is in progress.");
            return None;
        }
        self.runner.start(self.executable.as_deref(), args, &self.channel.sink())
    }

    pub async fn stop_app(&self) {
        self.runner.stop(&self.channel.sink()).await;
    }

    /// Take every pending line, applying the state changes its sentinel
    /// implies.
    pub fn drain(&mut self) -> Vec<StatusEvent> {
        // Sampled before popping: a finished task has pushed its last line.
        let build_done = self.build.as_ref().is_some_and(JoinHandle::is_finished);
        let events: Vec<_> = self
            .channel
            .try_pop_all()
            .into_iter()
            .map(|line| {
                let signal = Signal::classify(&line);
                if signal == Some(Signal::BuildSucceeded) {
                    self.executable = self.request.as_ref().map(BuildRequest::artifact_path);
                }
                StatusEvent { line, signal }
            })
            .collect();
        if build_done {
            debug!("build task finished");
            self.build = None;
        }
        events
    }
}

#[cfg(test)]
#[path = "workbench_tests.rs"]
mod tests;
