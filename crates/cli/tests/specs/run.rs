// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run command specs

use crate::prelude::*;

#[test]
fn missing_executable_reports_and_fails() {
    cli()
        .args(&["run", "/definitely/not/an/app"])
        .fails()
        .code_is(1)
        .stdout_has("--- Starting Application ---")
        .stdout_has("[ERROR] Failed to run executable")
        .stdout_has("--- Application Finished ---");
}

#[cfg(unix)]
#[test]
fn streams_output_until_exit() {
    cli()
        .args(&["run", "/bin/sh", "--", "-c", "echo one; echo two >&2"])
        .passes()
        .stdout_has("one")
        .stdout_has("two")
        .stdout_has("--- Application Finished ---")
        .stdout_lacks("--- Application Stopped ---");
}
