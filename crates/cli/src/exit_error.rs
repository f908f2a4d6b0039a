// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

/// Exit code after Ctrl-C stopped the application.
pub const INTERRUPTED: i32 = 130;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    /// Printed to stderr by `main()` unless empty.
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Exit 1 without a message; the status lines already said why.
    pub fn reported() -> Self {
        Self::new(1, "")
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "exit code {}", self.code)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ExitError {}
