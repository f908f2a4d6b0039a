// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Requirements check specs

use crate::prelude::*;

#[test]
fn missing_toolchain_fails_the_check() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .toolchain(&dir.path().join("missing.sh"))
        .args(&["check"])
        .fails()
        .code_is(1)
        .stdout_has("--- Starting Requirement Checks ---")
        .stdout_has("[FAILURE]")
        .stdout_has("--- Checks Failed ---");
}

#[test]
fn present_toolchain_passes() {
    let dir = tempfile::tempdir().unwrap();
    let bootstrap = fake_toolchain(dir.path(), "    :");

    cli()
        .toolchain(&bootstrap)
        .args(&["check"])
        .passes()
        .stdout_has("[SUCCESS] Found toolchain:")
        .stdout_has("--- All Requirements Met Successfully! ---");
}

#[test]
fn required_variable_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let bootstrap = fake_toolchain(dir.path(), "    :");

    cli()
        .toolchain(&bootstrap)
        .env("ONECLICK_SPEC_LIB_DIR", dir.path())
        .args(&["check", "--env", "ONECLICK_SPEC_LIB_DIR"])
        .passes()
        .stdout_has("[2/2] Checking for ONECLICK_SPEC_LIB_DIR...");

    cli()
        .toolchain(&bootstrap)
        .env("ONECLICK_SPEC_LIB_DIR", dir.path().join("gone"))
        .args(&["check", "--env", "ONECLICK_SPEC_LIB_DIR"])
        .fails()
        .stdout_has("'ONECLICK_SPEC_LIB_DIR'");
}
