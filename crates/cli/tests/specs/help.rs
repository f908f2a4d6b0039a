// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("check")
        .stdout_has("build")
        .stdout_has("run");
}

#[test]
fn build_help_shows_run_flag() {
    cli()
        .args(&["build", "--help"])
        .passes()
        .stdout_has("--run")
        .stdout_has("<PROJECT_DIR>");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn build_without_arguments_is_a_usage_error() {
    cli().args(&["build"]).fails().code_is(2);
}
