// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build script templating.
//!
//! The generated script configures with CMake, compiles, and checks for the
//! artifact, printing the sentinel lines from [`crate::signal`] as it goes.
//! Interpolated values are quoted for the target shell, never pasted raw.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Regex pattern for `${name}` placeholders
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-z_]+)\}").expect("constant regex pattern is valid")
});

const POSIX_TEMPLATE: &str = r#"echo '##################################################################'
echo '#                 STARTING C++ BUILD SCRIPT                      #'
echo '##################################################################'
echo

cd -- ${project_dir} || {
    echo "ERROR: Could not navigate to project directory: "${project_dir}
    exit 1
}

echo "Current Directory: $(pwd)"
echo

if [ -d build ]; then
    echo '"build" directory found. Removing for a clean build...'
    rm -rf build
fi
echo

echo 'Creating "build" directory...'
mkdir build && cd build || {
    echo 'ERROR: Failed to create or enter the "build" directory.'
    exit 1
}
echo

echo "Running CMake to configure the project..."
if ! cmake .. -G "Unix Makefiles"; then
    echo
    echo "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!"
    echo "!!!                  CMAKE FAILED.                             !!!"
    echo "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!"
    echo
    exit 1
fi
echo "CMake configuration successful."
echo

echo "Running make to compile the project..."
if ! make; then
    echo
    echo "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!"
    echo "!!!                  NMAKE BUILD FAILED.                       !!!"
    echo "!!!             This is likely a C++ code error.             !!!"
    echo "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!"
    echo
    exit 1
fi
echo "Build successful."
echo

if [ -e ${artifact} ]; then
    echo "**************************************************"
    echo "*   SUCCESS: Executable Found: "${artifact}
    echo "**************************************************"
    echo "__BUILD_SUCCESS_SIGNAL__"
else
    echo
    echo "ERROR: BUILD SUCCEEDED, BUT EXECUTABLE NOT FOUND!"
    echo "      Check the 'add_executable' name in CMakeLists.txt"
    echo
fi

echo
echo '##################################################################'
echo '#                  BUILD SCRIPT FINISHED                         #'
echo '##################################################################'
"#;

const BATCH_TEMPLATE: &str = r#"@echo off
setlocal DisableDelayedExpansion
echo ##################################################################
echo #                 STARTING C++ BUILD SCRIPT                      #
echo ##################################################################
echo.

cd /d ${project_dir}
if %errorlevel% neq 0 (
    echo ERROR: Could not navigate to project directory: ${project_dir}
    exit /b 1
)

echo Current Directory: %cd%
echo.

if exist "build" (
    echo "build" directory found. Removing for a clean build...
    rmdir /s /q build
)
echo.

echo Creating "build" directory...
mkdir build
cd build
if %errorlevel% neq 0 (
    echo ERROR: Failed to create or enter the "build" directory.
    exit /b 1
)
echo.

echo Running CMake to configure the project...
cmake .. -G "NMake Makefiles"
if %errorlevel% neq 0 (
    echo.
    echo !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!
    echo !!!                  CMAKE FAILED.                             !!!
    echo !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!
    echo.
    exit /b 1
)
echo CMake configuration successful.
echo.

echo Running nmake to compile the project...
nmake
if %errorlevel% neq 0 (
    echo.
    echo !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!
    echo !!!                  NMAKE BUILD FAILED.                       !!!
    echo !!!             This is likely a C++ code error.             !!!
    echo !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!
    echo.
    exit /b 1
)
echo Build successful.
echo.

if exist ${artifact} (
    echo **************************************************
    echo *   SUCCESS: Executable Found: ${artifact}
    echo **************************************************
    echo __BUILD_SUCCESS_SIGNAL__
) else (
    echo.
    echo ERROR: BUILD SUCCEEDED, BUT EXECUTABLE NOT FOUND!
    echo       Check the 'add_executable' name in CMakeLists.txt
    echo.
)

echo.
echo ##################################################################
echo #                  BUILD SCRIPT FINISHED                         #
echo ##################################################################
"#;

/// Errors from rendering a build script.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} contains {ch:?}, which cannot be embedded in a build script")]
    UnsafeCharacter { field: &'static str, ch: char },

    #[error("{field} is not valid UTF-8: {value}")]
    NonUtf8 { field: &'static str, value: String },
}

/// Shell flavour of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptDialect {
    /// `cmd.exe` batch file, run after `VsDevCmd.bat`
    Batch,
    /// POSIX shell, sourced by bash after the bootstrap
    Posix,
}

impl ScriptDialect {
    /// Dialect for the host OS.
    pub fn native() -> Self {
        if cfg!(windows) {
            ScriptDialect::Batch
        } else {
            ScriptDialect::Posix
        }
    }

    /// File suffix for the temporary script.
    pub fn extension(self) -> &'static str {
        match self {
            ScriptDialect::Batch => ".bat",
            ScriptDialect::Posix => ".sh",
        }
    }

    /// Render the build script for `project_dir` and `artifact`.
    pub fn render(self, project_dir: &Path, artifact: &str) -> Result<String, ScriptError> {
        let dir = project_dir.to_str().ok_or_else(|| ScriptError::NonUtf8 {
            field: "project directory",
            value: project_dir.display().to_string(),
        })?;

        let mut vars = HashMap::new();
        vars.insert("project_dir", self.quote("project directory", dir)?);
        vars.insert("artifact", self.quote("executable name", artifact)?);

        let rendered = match self {
            ScriptDialect::Batch => interpolate(BATCH_TEMPLATE, &vars).replace('\n', "\r\n"),
            ScriptDialect::Posix => interpolate(POSIX_TEMPLATE, &vars),
        };
        Ok(rendered)
    }

    /// Quote a value as a single shell word for this dialect.
    pub fn quote(self, field: &'static str, value: &str) -> Result<String, ScriptError> {
        if value.is_empty() {
            return Err(ScriptError::Empty { field });
        }
        if let Some(ch) = value.chars().find(|c| matches!(c, '\0' | '\r' | '\n')) {
            return Err(ScriptError::UnsafeCharacter { field, ch });
        }
        match self {
            ScriptDialect::Posix => Ok(format!("'{}'", escape_for_shell(value))),
            ScriptDialect::Batch => {
                // cmd has no escape for a quote inside a quoted word
                if value.contains('"') {
                    return Err(ScriptError::UnsafeCharacter { field, ch: '"' });
                }
                Ok(format!("\"{}\"", value.replace('%', "%%")))
            }
        }
    }
}

/// Render with the host dialect.
pub fn render(project_dir: &Path, artifact: &str) -> Result<String, ScriptError> {
    ScriptDialect::native().render(project_dir, artifact)
}

/// Escape a string for use inside a single-quoted shell word.
///
/// Single quotes become `'\''` (end quote, escaped literal quote, reopen).
pub fn escape_for_shell(s: &str) -> String {
    s.replace('\'', "'\\''")
}

/// Replace `${name}` placeholders with values from `vars`.
///
/// Unknown placeholders are left as-is.
fn interpolate(template: &str, vars: &HashMap<&str, String>) -> String {
    VAR_PATTERN
        .replace_all(template, |caps: &regex::Captures| match vars.get(&caps[1]) {
            Some(val) => val.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
