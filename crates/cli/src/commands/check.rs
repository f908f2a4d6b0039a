// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Requirements check command

use anyhow::Result;
use clap::Args;
use oneclick_engine::{check_requirements, ToolchainLocator};

use crate::color;
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct CheckArgs {
    /// Environment variable that must name an existing path (repeatable)
    #[arg(long = "env", value_name = "NAME")]
    pub env: Vec<String>,
}

pub fn handle(args: CheckArgs) -> Result<()> {
    let report = check_requirements(&ToolchainLocator::system(), &args.env);
    for line in &report.lines {
        println!("{}", color::report_line(line));
    }
    if report.passed {
        Ok(())
    } else {
        Err(ExitError::reported().into())
    }
}
