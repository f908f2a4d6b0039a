// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spec helpers: a hermetic `oneclick` invocation and fluent assertions.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct Cli {
    cmd: assert_cmd::Command,
}

/// `oneclick` with color off, a fast tick, and no toolchain overrides
/// leaking in from the caller's environment.
pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("oneclick").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("COLOR")
        .env("ONECLICK_POLL_MS", "10")
        .env_remove("ONECLICK_TOOLCHAIN")
        .env_remove("ONECLICK_TOOLCHAIN_ARGS")
        .env_remove("ONECLICK_LOG");
    Cli { cmd }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.arg(arg);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn toolchain(self, bootstrap: &Path) -> Self {
        self.env("ONECLICK_TOOLCHAIN", bootstrap)
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> Outcome {
        let outcome = self.run();
        assert_eq!(outcome.code, Some(0), "expected success\n{outcome}");
        outcome
    }

    /// Run and require a non-zero exit code.
    pub fn fails(self) -> Outcome {
        let outcome = self.run();
        assert_ne!(outcome.code, Some(0), "expected failure\n{outcome}");
        outcome
    }

    fn run(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        Outcome {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

pub struct Outcome {
    pub code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl Outcome {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}\n{self}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}\n{self}");
        self
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "{self}");
        self
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "exit: {:?}\n--- stdout ---\n{}--- stderr ---\n{}",
            self.code, self.stdout, self.stderr
        )
    }
}

/// Empty CMake project.
pub fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let cmake_lists = dir.path().join("CMakeLists.txt");
    std::fs::write(cmake_lists, "project(app)\n").unwrap();
    dir
}

/// Write a fake bootstrap into `dir`. `cmake` and `make` become shell
/// functions; `make_body` runs inside the build directory.
pub fn fake_toolchain(dir: &Path, make_body: &str) -> PathBuf {
    let path = dir.join("env.sh");
    let script = format!(
        "cmake() {{\n    echo '-- Configuring done'\n}}\nmake() {{\n{make_body}\n}}\n"
    );
    std::fs::write(&path, script).unwrap();
    path
}
