// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build command handler

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use oneclick_engine::{env, BuildRequest, ProcessSupervisor, Workbench};
use tracing::info;

use crate::exit_error::ExitError;
use crate::output;

#[derive(Args)]
pub struct BuildArgs {
    /// CMake project directory
    pub project_dir: PathBuf,

    /// Artifact name, as produced under <PROJECT_DIR>/build
    pub artifact: String,

    /// Run the artifact after a successful build
    #[arg(long)]
    pub run: bool,

    /// Arguments for the artifact when used with --run
    #[arg(last = true, value_name = "ARGS")]
    pub app_args: Vec<String>,
}

pub async fn handle(args: BuildArgs) -> Result<()> {
    let tick = env::poll_interval();
    let mut bench = Workbench::new(ProcessSupervisor::system());
    info!(project = %args.project_dir.display(), artifact = %args.artifact, "build requested");

    let request = BuildRequest::new(&args.project_dir, &args.artifact);
    if !bench.submit_build(request).await {
        output::print_events(&bench.drain());
        return Err(ExitError::reported().into());
    }

    let outcome = output::follow_build(&mut bench, tick).await;
    if !outcome.succeeded || outcome.failed || bench.executable().is_none() {
        return Err(ExitError::reported().into());
    }
    if !args.run {
        return Ok(());
    }

    super::run::run_to_end(&mut bench, &args.app_args, tick).await
}
