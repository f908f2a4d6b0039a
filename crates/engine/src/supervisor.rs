// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build supervision: bootstrap the toolchain, run the generated script,
//! stream its output.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::TempPath;
use thiserror::Error;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::channel::StatusSink;
use crate::pump;
use crate::script::{ScriptDialect, ScriptError};
use crate::signal::{BUILD_FINISHED, SEPARATOR};
use crate::toolchain::{Toolchain, ToolchainLocator};

/// Sources the bootstrap, then the build script, in one bash session so the
/// script sees everything the bootstrap exported. `$1` is the bootstrap,
/// `$2` the script, the rest are bootstrap arguments.
const POSIX_CHAIN: &str = r#"exec 2>&1
__oneclick_bootstrap=$1
__oneclick_script=$2
shift 2
. "$__oneclick_bootstrap" "$@" && . "$__oneclick_script""#;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// A request to build one CMake project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub project_dir: PathBuf,
    pub artifact_name: String,
}

impl BuildRequest {
    pub fn new(project_dir: impl Into<PathBuf>, artifact_name: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            artifact_name: artifact_name.into(),
        }
    }

    /// Where a successful build leaves the artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.project_dir.join("build").join(&self.artifact_name)
    }
}

/// Why a build could not run to completion.
///
/// The `Display` text is what the consumer sees on the status channel.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Project path does not exist: {}", .0.display())]
    InvalidProjectPath(PathBuf),

    #[error("Could not find toolchain bootstrap script (searched: {searched})")]
    ToolchainNotFound { searched: String },

    #[error("Cannot generate build script: {0}")]
    Script(#[from] ScriptError),

    #[error("Failed to write build script: {0}")]
    WriteScript(#[source] io::Error),

    #[error("An exception occurred: failed to start build: {0}")]
    Spawn(#[source] io::Error),

    #[error("An exception occurred: failed to read build output: {0}")]
    Stream(#[source] io::Error),
}

impl BuildError {
    /// Spawn and stream failures are reported as critical.
    pub fn is_critical(&self) -> bool {
        matches!(self, BuildError::Spawn(_) | BuildError::Stream(_))
    }
}

/// Runs one build at a time to completion, reporting through a sink.
#[derive(Debug, Clone)]
pub struct ProcessSupervisor {
    locator: ToolchainLocator,
    dialect: ScriptDialect,
    script_dir: Option<PathBuf>,
}

impl ProcessSupervisor {
    pub fn new(locator: ToolchainLocator, dialect: ScriptDialect) -> Self {
        Self {
            locator,
            dialect,
            script_dir: None,
        }
    }

    /// Supervisor for this machine's toolchain and shell.
    pub fn system() -> Self {
        Self::new(ToolchainLocator::system(), ScriptDialect::native())
    }

    /// Write temporary scripts under `dir` instead of the system temp dir.
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = Some(dir.into());
        self
    }

    /// Run the build on a dedicated task.
    pub fn spawn(&self, request: BuildRequest, sink: StatusSink) -> JoinHandle<()> {
        let supervisor = self.clone();
        tokio::spawn(async move {
            supervisor.run(&request.project_dir, &request.artifact_name, &sink).await;
        })
    }

    /// Build `artifact` in `project_dir`, streaming every line to `sink`.
    ///
    /// Never fails: any error becomes a single `[ERROR]` or
    /// `[CRITICAL ERROR]` line. The temporary script is gone by the time this
    /// returns, whatever happened.
    pub async fn run(&self, project_dir: &Path, artifact: &str, sink: &StatusSink) {
        match self.run_inner(project_dir, artifact, sink).await {
            Ok(()) => {}
            Err(e) if e.is_critical() => {
                warn!(error = %e, project = %project_dir.display(), "build aborted");
                sink.critical(&e);
            }
            Err(e) => {
                info!(error = %e, project = %project_dir.display(), "build rejected");
                sink.error(&e);
            }
        }
    }

    async fn run_inner(
        &self,
        project_dir: &Path,
        artifact: &str,
        sink: &StatusSink,
    ) -> Result<(), BuildError> {
        if !project_dir.is_dir() {
            return Err(BuildError::InvalidProjectPath(project_dir.to_path_buf()));
        }

        let toolchain = self.locator.locate().ok_or_else(|| BuildError::ToolchainNotFound {
            searched: self
                .locator
                .candidates()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })?;

        sink.push(">>> Generating dynamic build script...");
        let script = self.dialect.render(project_dir, artifact)?;

        // Removed on drop, including on every early return below.
        let script_path = self.write_script(&script)?;

        sink.push(format!(">>> Running build script: {}", script_path.display()));
        sink.push(SEPARATOR);

        let mut cmd = chained_command(self.dialect, &toolchain, &script_path);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(BuildError::Spawn)?;
        info!(
            pid = child.id(),
            project = %project_dir.display(),
            bootstrap = %toolchain.bootstrap.display(),
            "build started"
        );

        let lines = pump::forward_output(&mut child, |line| sink.push(line))
            .await
            .map_err(BuildError::Stream)?;
        let status = child.wait().await.map_err(BuildError::Stream)?;
        info!(lines, exit_code = status.code(), "build process exited");

        sink.push(SEPARATOR);
        sink.push(format!(">>> {BUILD_FINISHED}"));
        Ok(())
    }

    fn write_script(&self, script: &str) -> Result<TempPath, BuildError> {
        let mut builder = tempfile::Builder::new();
        builder
            .prefix("oneclick-build-")
            .suffix(self.dialect.extension());
        let mut file = match &self.script_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(BuildError::WriteScript)?;

        file.write_all(script.as_bytes())
            .map_err(BuildError::WriteScript)?;
        file.flush().map_err(BuildError::WriteScript)?;
        Ok(file.into_temp_path())
    }
}

/// One shell invocation that bootstraps the toolchain and then runs the
/// script in that same environment.
fn chained_command(dialect: ScriptDialect, toolchain: &Toolchain, script: &Path) -> Command {
    match dialect {
        ScriptDialect::Posix => {
            let mut cmd = Command::new("bash");
            cmd.arg("-c")
                .arg(POSIX_CHAIN)
                .arg("oneclick-build")
                .arg(&toolchain.bootstrap)
                .arg(script)
                .args(&toolchain.args);
            cmd
        }
        ScriptDialect::Batch => batch_command(toolchain, script),
    }
}

#[cfg(windows)]
fn batch_command(toolchain: &Toolchain, script: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.raw_arg(batch_chain(toolchain, script))
        .creation_flags(CREATE_NO_WINDOW);
    cmd
}

// cmd is absent off Windows; the spawn error is reported like any other.
#[cfg(not(windows))]
fn batch_command(toolchain: &Toolchain, script: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg(batch_chain(toolchain, script));
    cmd
}

/// `cmd.exe` arguments: `call` both files in one session, stderr merged.
fn batch_chain(toolchain: &Toolchain, script: &Path) -> String {
    let mut bootstrap = format!("call \"{}\"", toolchain.bootstrap.display());
    for arg in &toolchain.args {
        bootstrap.push(' ');
        bootstrap.push_str(arg);
    }
    format!("/S /C \"({bootstrap} && call \"{}\") 2>&1\"", script.display())
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
