// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unbounded FIFO of status lines between worker tasks and the consumer.

use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::signal::{CRITICAL_PREFIX, ERROR_PREFIX, INFO_PREFIX};

/// Shared line queue.
///
/// Producers push through a [`StatusSink`]; the consumer drains with
/// [`StatusChannel::try_pop_all`] on its own tick. Pushing never blocks and
/// never fails.
#[derive(Clone, Default)]
pub struct StatusChannel {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write-only handle for a producer.
    pub fn sink(&self) -> StatusSink {
        StatusSink {
            lines: Arc::clone(&self.lines),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines.lock().push_back(line.into());
    }

    /// Take every queued line in push order without waiting.
    pub fn try_pop_all(&self) -> Vec<String> {
        self.lines.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

/// Producer side of a [`StatusChannel`].
#[derive(Clone)]
pub struct StatusSink {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl StatusSink {
    pub fn push(&self, line: impl Into<String>) {
        self.lines.lock().push_back(line.into());
    }

    /// Push `[ERROR] {message}`.
    pub fn error(&self, message: impl Display) {
        self.push(format!("{ERROR_PREFIX} {message}"));
    }

    /// Push `[CRITICAL ERROR] {message}`.
    pub fn critical(&self, message: impl Display) {
        self.push(format!("{CRITICAL_PREFIX} {message}"));
    }

    /// Push `[INFO] {message}`.
    pub fn info(&self, message: impl Display) {
        self.push(format!("{INFO_PREFIX} {message}"));
    }
}

impl std::fmt::Debug for StatusSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSink")
            .field("queued", &self.lines.lock().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
