// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build command specs

use crate::prelude::*;

#[test]
fn missing_project_dir_fails() {
    cli()
        .args(&["build", "/definitely/not/a/project", "app"])
        .fails()
        .stdout_has("[ERROR] Project path does not exist");
}

#[test]
fn missing_toolchain_fails() {
    let proj = project();
    let dir = tempfile::tempdir().unwrap();

    cli()
        .toolchain(&dir.path().join("missing.sh"))
        .arg("build")
        .arg(proj.path())
        .arg("app")
        .fails()
        .stdout_has("Could not find toolchain bootstrap script")
        .stdout_lacks(">>> Running build script");
}

#[test]
fn empty_artifact_name_is_rejected() {
    let proj = project();

    cli()
        .arg("build")
        .arg(proj.path())
        .arg("")
        .fails()
        .stdout_has("[ERROR] Project Path and Executable Name are required.");
}

#[cfg(unix)]
mod unix {
    use super::*;

    #[test]
    fn successful_build_exits_zero() {
        let proj = project();
        let tools = tempfile::tempdir().unwrap();
        let bootstrap = fake_toolchain(tools.path(), "    echo compiling\n    : > app");

        cli()
            .toolchain(&bootstrap)
            .arg("build")
            .arg(proj.path())
            .arg("app")
            .passes()
            .stdout_has("compiling")
            .stdout_has("__BUILD_SUCCESS_SIGNAL__")
            .stdout_has(">>> Build process finished.");
        assert!(proj.path().join("build").join("app").exists());
    }

    #[test]
    fn compile_failure_exits_nonzero() {
        let proj = project();
        let tools = tempfile::tempdir().unwrap();
        let bootstrap =
            fake_toolchain(tools.path(), "    echo 'main.cpp:1: error: boom' >&2\n    return 1");

        cli()
            .toolchain(&bootstrap)
            .arg("build")
            .arg(proj.path())
            .arg("app")
            .fails()
            .code_is(1)
            .stdout_has("main.cpp:1: error: boom")
            .stdout_has("NMAKE BUILD FAILED")
            .stdout_lacks("__BUILD_SUCCESS_SIGNAL__");
    }

    #[test]
    fn missing_artifact_exits_nonzero() {
        let proj = project();
        let tools = tempfile::tempdir().unwrap();
        let bootstrap = fake_toolchain(tools.path(), "    : > other");

        cli()
            .toolchain(&bootstrap)
            .arg("build")
            .arg(proj.path())
            .arg("app")
            .fails()
            .stdout_has("BUILD SUCCEEDED, BUT EXECUTABLE NOT FOUND");
    }

    #[test]
    fn build_then_run_streams_application_output() {
        let proj = project();
        let tools = tempfile::tempdir().unwrap();
        let make = "    printf '#!/bin/sh\\necho \"hello from $1\"\\n' > app\n    chmod +x app";
        let bootstrap = fake_toolchain(tools.path(), make);

        let outcome = cli()
            .toolchain(&bootstrap)
            .arg("build")
            .arg(proj.path())
            .args(&["app", "--run", "--", "oneclick"])
            .passes()
            .stdout_has("--- Starting Application ---")
            .stdout_has("hello from oneclick")
            .stdout_has("--- Application Finished ---");

        let out = outcome.stdout();
        let built = out.find("__BUILD_SUCCESS_SIGNAL__").unwrap();
        let started = out.find("--- Starting Application ---").unwrap();
        assert!(built < started);
    }
}
