// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake toolchains and projects for process tests.
//!
//! The fake bootstrap defines `cmake` and `make` as shell functions and
//! exports a marker variable. Because the build script is sourced into the
//! same bash session, the functions shadow any real tools and `make` can
//! assert that the bootstrap environment is visible.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use crate::channel::StatusChannel;
use crate::signal::Signal;
use crate::toolchain::ToolchainLocator;

/// How a fake tool behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Pass,
    Fail,
}

pub(crate) struct FakeToolchain {
    dir: TempDir,
}

impl FakeToolchain {
    /// Fake toolchain whose `make` prints A, B, C and, if `produces` is set,
    /// creates that artifact in the build directory.
    pub(crate) fn new(configure: Step, compile: Step, produces: Option<&str>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let configure_body = match configure {
            Step::Pass => "echo '-- Configuring done'\n    return 0",
            Step::Fail => "echo 'CMake Error at CMakeLists.txt:1 (project)'\n    return 1",
        };
        let touch = match produces {
            Some(name) => format!(": > '{}'", crate::script::escape_for_shell(name)),
            None => ":".to_string(),
        };
        let compile_body = match compile {
            Step::Pass => format!("echo A\n    echo B\n    echo C\n    {touch}\n    return 0"),
            Step::Fail => "echo 'main.cpp:3: error: expected ;' >&2\n    return 2".to_string(),
        };
        // make only works inside the bootstrapped environment.
        let guard = "[ -n \"$ONECLICK_FAKE_TOOLCHAIN\" ] \
                     || { echo 'toolchain environment missing'; return 3; }";
        let bootstrap = format!(
            "export ONECLICK_FAKE_TOOLCHAIN=1\n\
             cmake() {{\n    {configure_body}\n}}\n\
             make() {{\n    {guard}\n    {compile_body}\n}}\n"
        );
        std::fs::write(dir.path().join("env.sh"), bootstrap).unwrap();
        Self { dir }
    }

    pub(crate) fn bootstrap(&self) -> PathBuf {
        self.dir.path().join("env.sh")
    }

    pub(crate) fn locator(&self) -> ToolchainLocator {
        ToolchainLocator::new(vec![self.bootstrap()], vec![])
    }
}

/// Empty CMake project directory.
pub(crate) fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let cmake_lists = dir.path().join("CMakeLists.txt");
    std::fs::write(cmake_lists, "project(app)\n").unwrap();
    dir
}

/// Files currently in `dir`.
pub(crate) fn entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}

/// Path announced on the `>>> Running build script:` line, if any.
pub(crate) fn announced_script(lines: &[String]) -> Option<PathBuf> {
    lines
        .iter()
        .find_map(|l| l.strip_prefix(">>> Running build script: "))
        .map(PathBuf::from)
}

/// Drain `channel` until a line satisfies `done` or `timeout` elapses.
pub(crate) async fn drain_until(
    channel: &StatusChannel,
    timeout: Duration,
    done: impl Fn(&str) -> bool,
) -> Vec<String> {
    let deadline = tokio::time::Instant::now() + timeout;
    let mut seen = Vec::new();
    loop {
        let batch = channel.try_pop_all();
        let hit = batch.iter().any(|l| done(l));
        seen.extend(batch);
        if hit || tokio::time::Instant::now() >= deadline {
            return seen;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Drain until the run phase ends.
pub(crate) async fn drain_run(channel: &StatusChannel) -> Vec<String> {
    drain_until(channel, Duration::from_secs(10), |l| {
        Signal::classify(l).is_some_and(Signal::ends_run)
    })
    .await
}
