// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run command handler

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use oneclick_engine::{env, ProcessSupervisor, Workbench};

use crate::exit_error::{ExitError, INTERRUPTED};
use crate::output;

#[derive(Args)]
pub struct RunArgs {
    /// Executable to run
    pub executable: PathBuf,

    /// Arguments for the executable
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let mut bench = Workbench::new(ProcessSupervisor::system());
    bench.set_executable(args.executable);
    run_to_end(&mut bench, &args.args, env::poll_interval()).await
}

/// Start the workbench's executable and stream it until it ends.
pub(crate) async fn run_to_end(
    bench: &mut Workbench,
    args: &[String],
    tick: Duration,
) -> Result<()> {
    if bench.start_app(args).is_none() {
        output::print_events(&bench.drain());
        return Err(ExitError::reported().into());
    }

    let outcome = output::follow_run(bench, tick).await;
    if outcome.interrupted {
        Err(ExitError::new(INTERRUPTED, "").into())
    } else if outcome.errored {
        Err(ExitError::reported().into())
    } else {
        Ok(())
    }
}
