// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-build requirement report.
//!
//! Checks run in order and stop at the first failure. The toolchain
//! bootstrap always comes first, followed by each required environment
//! variable, which must be set and name an existing path.

use std::path::Path;

use tracing::debug;

use crate::toolchain::ToolchainLocator;

pub const CHECKS_STARTED: &str = "--- Starting Requirement Checks ---";
pub const CHECKS_PASSED: &str = "--- All Requirements Met Successfully! ---";
pub const CHECKS_FAILED: &str = "--- Checks Failed ---";

/// Outcome of [`check_requirements`], as display lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementReport {
    pub lines: Vec<String>,
    pub passed: bool,
}

impl RequirementReport {
    fn fail(mut self, reason: String, hint: String) -> Self {
        self.lines.push(format!("  [FAILURE] {reason}"));
        self.lines.push(format!("  {hint}"));
        self.lines.push(CHECKS_FAILED.to_string());
        self.passed = false;
        self
    }
}

/// Report whether this machine can build: the toolchain bootstrap is found
/// and every variable in `required_env` points at an existing path.
pub fn check_requirements(
    locator: &ToolchainLocator,
    required_env: &[String],
) -> RequirementReport {
    check_with(locator, required_env, |name| std::env::var_os(name))
}

fn check_with(
    locator: &ToolchainLocator,
    required_env: &[String],
    lookup: impl Fn(&str) -> Option<std::ffi::OsString>,
) -> RequirementReport {
    let total = 1 + required_env.len();
    let mut report = RequirementReport {
        lines: vec![CHECKS_STARTED.to_string()],
        passed: true,
    };

    report.lines.push(String::new());
    report.lines.push(format!("[1/{total}] Checking for toolchain bootstrap..."));
    match locator.locate() {
        Some(toolchain) => report
            .lines
            .push(format!("  [SUCCESS] Found toolchain: {}", toolchain.bootstrap.display())),
        None => {
            let searched = locator
                .candidates()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return report.fail(
                "Could not find a toolchain bootstrap script.".to_string(),
                format!(
                    "Install the C++ toolchain or set ONECLICK_TOOLCHAIN (searched: {searched})."
                ),
            );
        }
    }

    for (i, name) in required_env.iter().enumerate() {
        report.lines.push(String::new());
        report.lines.push(format!("[{}/{total}] Checking for {name}...", i + 2));
        match lookup(name) {
            Some(value) if !value.is_empty() && Path::new(&value).exists() => {
                report.lines.push(format!(
                    "  [SUCCESS] Found {name}: {}",
                    Path::new(&value).display()
                ));
            }
            _ => {
                debug!(var = %name, "required variable missing or invalid");
                return report.fail(
                    format!(
                        "The '{name}' environment variable is not set or points to an invalid path."
                    ),
                    format!("Please set {name} to an existing directory."),
                );
            }
        }
    }

    report.lines.push(String::new());
    report.lines.push(CHECKS_PASSED.to_string());
    report
}

#[cfg(test)]
#[path = "requirements_tests.rs"]
mod tests;
