// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! oneclick engine
//!
//! Supervises a native CMake build inside a bootstrapped toolchain
//! environment and the lifecycle of the executable it produces. Everything
//! the engine has to say reaches the consumer as text lines on a
//! [`StatusChannel`]; state changes are signalled by the sentinel lines in
//! [`signal`].

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod env;
mod pump;
pub mod requirements;
pub mod runner;
pub mod script;
pub mod signal;
pub mod supervisor;
pub mod toolchain;
pub mod workbench;

#[cfg(test)]
mod test_support;

pub use channel::{StatusChannel, StatusSink};
pub use requirements::{check_requirements, RequirementReport};
pub use runner::{ApplicationRunner, RunState};
pub use script::{render, ScriptDialect, ScriptError};
pub use signal::Signal;
pub use supervisor::{BuildError, BuildRequest, ProcessSupervisor};
pub use toolchain::{Toolchain, ToolchainLocator};
pub use workbench::{StatusEvent, Workbench};
