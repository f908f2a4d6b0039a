// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sentinel lines shared between the engine and its consumers.
//!
//! The build tool's exit status is masked by the bootstrap wrapper, so state
//! changes are carried in-band as fixed text. The exact strings below are a
//! wire contract: consumers match them by substring and they must not change.

/// Emitted by the generated script once the artifact exists.
pub const BUILD_SUCCESS: &str = "__BUILD_SUCCESS_SIGNAL__";

/// Configure step (CMake) reported a non-zero status.
pub const CONFIGURE_FAILED: &str = "CMAKE FAILED";

/// Compile step (nmake/make) reported a non-zero status.
pub const COMPILE_FAILED: &str = "NMAKE BUILD FAILED";

/// Compile succeeded but the named artifact is not on disk.
pub const ARTIFACT_MISSING: &str = "BUILD SUCCEEDED, BUT EXECUTABLE NOT FOUND";

/// Pushed by the supervisor after the build child exits.
pub const BUILD_FINISHED: &str = "Build process finished.";

/// Pushed when a tracked application exits on its own.
pub const APP_FINISHED: &str = "--- Application Finished ---";

/// Pushed when a tracked application is terminated by `stop()`.
pub const APP_STOPPED: &str = "--- Application Stopped ---";

pub const APP_STARTING: &str = "--- Starting Application ---";
pub const APP_STOPPING: &str = "--- Stopping Application ---";

/// Prefix of engine-generated error lines.
pub const ERROR_PREFIX: &str = "[ERROR]";

/// Prefix of the line emitted when spawning or streaming a child blew up.
pub const CRITICAL_PREFIX: &str = "[CRITICAL ERROR]";

pub const INFO_PREFIX: &str = "[INFO]";

/// Separator printed around the build child's output.
pub const SEPARATOR: &str =
    "------------------------------------------------------------";

/// Typed view of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    BuildSucceeded,
    ConfigureFailed,
    CompileFailed,
    ArtifactMissing,
    BuildFinished,
    Error,
    CriticalError,
    AppFinished,
    AppStopped,
}

impl Signal {
    /// Classify a line by the sentinel it carries, if any.
    ///
    /// Error prefixes are matched after leading whitespace is skipped; all
    /// other sentinels match anywhere in the line.
    pub fn classify(line: &str) -> Option<Signal> {
        let trimmed = line.trim_start();
        if trimmed.starts_with(CRITICAL_PREFIX) {
            return Some(Signal::CriticalError);
        }
        if trimmed.starts_with(ERROR_PREFIX) {
            return Some(Signal::Error);
        }
        if line.contains(BUILD_SUCCESS) {
            Some(Signal::BuildSucceeded)
        } else if line.contains(CONFIGURE_FAILED) {
            Some(Signal::ConfigureFailed)
        } else if line.contains(COMPILE_FAILED) {
            Some(Signal::CompileFailed)
        } else if line.contains(ARTIFACT_MISSING) {
            Some(Signal::ArtifactMissing)
        } else if line.contains(BUILD_FINISHED) {
            Some(Signal::BuildFinished)
        } else if line.contains(APP_FINISHED) {
            Some(Signal::AppFinished)
        } else if line.contains(APP_STOPPED) {
            Some(Signal::AppStopped)
        } else {
            None
        }
    }

    /// True for lines after which the build phase is over.
    ///
    /// A missing artifact is not terminal on its own: the supervisor's
    /// finish line still follows it.
    pub fn ends_build(self) -> bool {
        matches!(
            self,
            Signal::ConfigureFailed
                | Signal::CompileFailed
                | Signal::BuildFinished
                | Signal::Error
                | Signal::CriticalError
        )
    }

    /// True for lines after which the run phase is over.
    pub fn ends_run(self) -> bool {
        matches!(self, Signal::AppFinished | Signal::AppStopped)
    }

    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Signal::ConfigureFailed
                | Signal::CompileFailed
                | Signal::ArtifactMissing
                | Signal::Error
                | Signal::CriticalError
        )
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
