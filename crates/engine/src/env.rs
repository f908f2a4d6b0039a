// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;
use std::time::Duration;

/// Explicit toolchain bootstrap path. Replaces the built-in candidate list.
pub fn toolchain_override() -> Option<PathBuf> {
    std::env::var("ONECLICK_TOOLCHAIN")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Arguments passed to the bootstrap script, whitespace-separated.
pub fn toolchain_args() -> Option<Vec<String>> {
    std::env::var("ONECLICK_TOOLCHAIN_ARGS")
        .ok()
        .map(|s| s.split_whitespace().map(str::to_string).collect())
}

/// Consumer drain interval (default 100ms)
pub fn poll_interval() -> Duration {
    std::env::var("ONECLICK_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(100))
}
