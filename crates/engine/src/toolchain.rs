// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Toolchain bootstrap discovery.

use std::path::PathBuf;

/// Well-known bootstrap locations, searched in order.
#[cfg(windows)]
const DEFAULT_CANDIDATES: &[&str] = &[
    r"C:\Program Files\Microsoft Visual Studio\2022\Community\Common7\Tools\VsDevCmd.bat",
    r"C:\Program Files\Microsoft Visual Studio\2022\Professional\Common7\Tools\VsDevCmd.bat",
    r"C:\Program Files\Microsoft Visual Studio\2022\Enterprise\Common7\Tools\VsDevCmd.bat",
    r"C:\Program Files (x86)\Microsoft Visual Studio\2022\BuildTools\Common7\Tools\VsDevCmd.bat",
];

/// Well-known bootstrap locations, searched in order.
#[cfg(not(windows))]
const DEFAULT_CANDIDATES: &[&str] = &[
    "/opt/intel/oneapi/setvars.sh",
    "/opt/rh/gcc-toolset-13/enable",
    "/etc/profile.d/oneclick-toolchain.sh",
];

#[cfg(windows)]
const DEFAULT_ARGS: &[&str] = &["-arch=x64"];

#[cfg(not(windows))]
const DEFAULT_ARGS: &[&str] = &[];

/// A resolved bootstrap script and the arguments to source it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub bootstrap: PathBuf,
    pub args: Vec<String>,
}

/// Searches a fixed, ordered candidate list for the bootstrap script.
///
/// Nothing is cached: every [`locate`](Self::locate) hits the filesystem
/// again, since an install may appear or vanish between builds.
#[derive(Debug, Clone)]
pub struct ToolchainLocator {
    candidates: Vec<PathBuf>,
    args: Vec<String>,
}

impl ToolchainLocator {
    /// Locator for this machine.
    ///
    /// `ONECLICK_TOOLCHAIN` replaces the built-in candidates with a single
    /// path; `ONECLICK_TOOLCHAIN_ARGS` replaces the default bootstrap
    /// arguments.
    pub fn system() -> Self {
        let candidates = match crate::env::toolchain_override() {
            Some(path) => vec![path],
            None => DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect(),
        };
        let args = crate::env::toolchain_args()
            .unwrap_or_else(|| DEFAULT_ARGS.iter().map(|s| s.to_string()).collect());
        Self { candidates, args }
    }

    pub fn new(candidates: Vec<PathBuf>, args: Vec<String>) -> Self {
        Self { candidates, args }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that exists on disk, or `None`.
    pub fn locate(&self) -> Option<Toolchain> {
        let found = self.candidates.iter().find(|p| p.is_file())?;
        tracing::debug!(bootstrap = %found.display(), "toolchain located");
        Some(Toolchain {
            bootstrap: found.clone(),
            args: self.args.clone(),
        })
    }
}

#[cfg(test)]
#[path = "toolchain_tests.rs"]
mod tests;
