// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so stdout carries only status lines.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives, e.g. `ONECLICK_LOG=oneclick_engine=debug`.
const LOG_ENV: &str = "ONECLICK_LOG";

const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
