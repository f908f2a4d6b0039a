// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! oneclick: build a CMake project inside its toolchain environment and run
//! the result.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use clap::{Parser, Subcommand};

use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "oneclick",
    version,
    about = "Build a CMake project inside its toolchain environment and run it",
    styles = color::styles()
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check for the toolchain bootstrap and required environment variables
    Check(commands::check::CheckArgs),
    /// Build a project, optionally running the artifact afterwards
    Build(commands::build::BuildArgs),
    /// Run an executable until it exits (Ctrl-C stops it)
    Run(commands::run::RunArgs),
}

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => commands::check::handle(args),
        Commands::Build(args) => commands::build::handle(args).await,
        Commands::Run(args) => commands::run::handle(args).await,
    };

    if let Err(e) = result {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("error: {e:#}");
                1
            }
        };
        std::process::exit(code);
    }
}
