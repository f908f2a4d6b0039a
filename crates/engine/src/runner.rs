// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle of the built application: start, stream, stop.

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::channel::StatusSink;
use crate::pump;
use crate::signal::{APP_FINISHED, APP_STARTING, APP_STOPPED, APP_STOPPING};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Errors from running the application.
///
/// The `Display` text is what the consumer sees on the status channel.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Application is already running.")]
    AlreadyRunning,

    #[error("Application is still stopping.")]
    StillStopping,

    #[error("No executable path is set. Build the project first.")]
    NoExecutable,

    #[error("Failed to run executable: {0}")]
    Spawn(#[source] io::Error),

    #[error("Failed to read application output: {0}")]
    Stream(#[source] io::Error),

    #[error("Failed to stop process tree: {0}")]
    Terminate(String),
}

/// Where the tracked application is in its lifecycle.
///
/// `Finished` and `Stopped` are not states of their own: both land back on
/// `Idle`, announced by [`APP_FINISHED`] or [`APP_STOPPED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Starting,
    Running { pid: u32 },
    /// Stopped while still spawning. The worker reaps the child, then
    /// returns the slot to `Idle`.
    Stopping,
}

#[derive(Debug)]
struct Slot {
    state: RunState,
    /// Bumped on every accepted start; a worker only acts while it matches.
    generation: u64,
}

/// Tracks at most one running application.
///
/// Cheap to clone; clones share the same slot.
#[derive(Debug, Clone)]
pub struct ApplicationRunner {
    slot: Arc<Mutex<Slot>>,
}

impl Default for ApplicationRunner {
    fn default() -> Self {
        let slot = Slot {
            state: RunState::Idle,
            generation: 0,
        };
        Self {
            slot: Arc::new(Mutex::new(slot)),
        }
    }
}

impl ApplicationRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.slot.lock().state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state(), RunState::Starting | RunState::Running { .. })
    }

    /// Start `executable` with `args` on a dedicated task.
    ///
    /// Returns `None` without spawning when a run is already tracked or no
    /// executable is set; the reason goes to `sink`.
    pub fn start(
        &self,
        executable: Option<&Path>,
        args: &[String],
        sink: &StatusSink,
    ) -> Option<JoinHandle<()>> {
        let (executable, generation) = {
            let mut slot = self.slot.lock();
            match slot.state {
                RunState::Idle => {}
                RunState::Stopping => {
                    sink.info(RunError::StillStopping);
                    return None;
                }
                RunState::Starting | RunState::Running { .. } => {
                    sink.info(RunError::AlreadyRunning);
                    return None;
                }
            }
            let Some(executable) = executable else {
                sink.error(RunError::NoExecutable);
                return None;
            };
            slot.generation += 1;
            slot.state = RunState::Starting;
            (executable, slot.generation)
        };

        sink.push(APP_STARTING);
        let mut cmd = Command::new(executable);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so stop() can signal every descendant at once.
        #[cfg(unix)]
        cmd.process_group(0);
        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        let runner = self.clone();
        let sink = sink.clone();
        Some(tokio::spawn(async move { runner.supervise(cmd, generation, sink).await }))
    }

    /// Forcefully terminate the tracked application and everything it spawned.
    ///
    /// The slot is cleared before the kill is attempted, so the runner is
    /// `Idle` on return even if termination failed. A run caught while still
    /// spawning is left `Stopping` until its worker has reaped the child, and
    /// no new start is accepted until then.
    pub async fn stop(&self, sink: &StatusSink) {
        let previous = {
            let mut slot = self.slot.lock();
            let previous = slot.state;
            slot.state = match previous {
                RunState::Starting | RunState::Stopping => RunState::Stopping,
                RunState::Idle | RunState::Running { .. } => RunState::Idle,
            };
            previous
        };
        match previous {
            RunState::Idle | RunState::Stopping => {}
            RunState::Starting => {
                // The worker sees `Stopping` and kills the child itself.
                sink.push(APP_STOPPING);
                sink.push(APP_STOPPED);
            }
            RunState::Running { pid } => {
                sink.push(APP_STOPPING);
                match kill_tree(pid).await {
                    Ok(()) => info!(pid, "application tree terminated"),
                    Err(e) => {
                        warn!(pid, error = %e, "application tree termination failed");
                        sink.error(e);
                    }
                }
                sink.push(APP_STOPPED);
            }
        }
    }

    async fn supervise(self, mut cmd: Command, generation: u64, sink: StatusSink) {
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(error = %e, "application spawn failed");
                self.finish(generation, Some(RunError::Spawn(e)), &sink);
                return;
            }
        };

        let Some(pid) = child.id() else {
            self.finish(generation, None, &sink);
            return;
        };

        if !self.mark_running(generation, pid) {
            // stop() arrived while we were still spawning.
            if let Err(e) = kill_tree(pid).await {
                warn!(pid, error = %e, "late stop failed to terminate application");
            }
            let _ = child.wait().await;
            self.release(generation);
            return;
        }
        info!(pid, "application started");

        let streamed = self.forward(&mut child, generation, &sink).await;
        let status = child.wait().await;
        info!(
            pid,
            exit_code = status.as_ref().ok().and_then(|s| s.code()),
            "application exited"
        );

        self.finish(generation, streamed.err().map(RunError::Stream), &sink);
    }

    /// Forward child output while this run is still the tracked one.
    ///
    /// The slot lock is held across each push, so once `stop()` has cleared
    /// the slot no further line from this child reaches the sink.
    async fn forward(
        &self,
        child: &mut Child,
        generation: u64,
        sink: &StatusSink,
    ) -> io::Result<usize> {
        pump::forward_output(child, |line| {
            let slot = self.slot.lock();
            let tracked = matches!(slot.state, RunState::Running { .. });
            if slot.generation == generation && tracked {
                sink.push(line);
            }
        })
        .await
    }

    fn mark_running(&self, generation: u64, pid: u32) -> bool {
        let mut slot = self.slot.lock();
        if slot.generation == generation && slot.state == RunState::Starting {
            slot.state = RunState::Running { pid };
            true
        } else {
            false
        }
    }

    /// Hand a `Stopping` slot back once its child is gone.
    fn release(&self, generation: u64) {
        let mut slot = self.slot.lock();
        if slot.generation == generation && slot.state == RunState::Stopping {
            slot.state = RunState::Idle;
        }
    }

    /// Clear the slot after a natural exit and announce it.
    ///
    /// Does nothing if the run was stopped or superseded in the meantime.
    fn finish(&self, generation: u64, error: Option<RunError>, sink: &StatusSink) {
        let mut slot = self.slot.lock();
        if slot.generation != generation {
            return;
        }
        match slot.state {
            RunState::Idle => return,
            // Already announced by stop().
            RunState::Stopping => {
                slot.state = RunState::Idle;
                return;
            }
            RunState::Starting | RunState::Running { .. } => {}
        }
        slot.state = RunState::Idle;
        if let Some(e) = error {
            sink.error(e);
        }
        sink.push(APP_FINISHED);
    }
}

#[cfg(unix)]
async fn kill_tree(pid: u32) -> Result<(), RunError> {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let pgid = i32::try_from(pid)
        .map_err(|e| RunError::Terminate(e.to_string()))?;
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        // Group already gone
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(RunError::Terminate(e.to_string())),
    }
}

#[cfg(windows)]
async fn kill_tree(pid: u32) -> Result<(), RunError> {
    let status = Command::new("taskkill")
        .args(["/F", "/T", "/PID", &pid.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(CREATE_NO_WINDOW)
        .status()
        .await
        .map_err(|e| RunError::Terminate(e.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(RunError::Terminate(format!("taskkill exited with {status}")))
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
