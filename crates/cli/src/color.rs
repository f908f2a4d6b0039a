// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use oneclick_engine::requirements::CHECKS_FAILED;
use oneclick_engine::signal::SEPARATOR;
use oneclick_engine::Signal;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers and phase banners: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Engine narration (`>>>` lines, separators): medium grey
    pub const CONTEXT: u8 = 245;
    /// Success markers: soft green
    pub const SUCCESS: u8 = 114;
    /// Failure markers: soft red
    pub const FAILURE: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::CONTEXT))
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

const RESET: &str = "\x1b[0m";

fn paint(code: Option<u8>, text: &str) -> String {
    match code {
        Some(code) if should_colorize() => format!("\x1b[38;5;{code}m{text}{RESET}"),
        _ => text.to_string(),
    }
}

/// Palette entry for a status line, by the sentinel it carries.
///
/// Child output without a sentinel stays uncolored.
fn status_code(line: &str, signal: Option<Signal>) -> Option<u8> {
    match signal {
        Some(Signal::BuildSucceeded) => Some(codes::SUCCESS),
        Some(s) if s.is_failure() => Some(codes::FAILURE),
        Some(_) => Some(codes::HEADER),
        None if line.starts_with("--- ") => Some(codes::HEADER),
        None if line.starts_with(">>> ") || line == SEPARATOR => Some(codes::CONTEXT),
        None => None,
    }
}

fn report_code(line: &str) -> Option<u8> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("[SUCCESS]") {
        Some(codes::SUCCESS)
    } else if trimmed.starts_with("[FAILURE]") || line == CHECKS_FAILED {
        Some(codes::FAILURE)
    } else if line.starts_with("--- ") {
        Some(codes::HEADER)
    } else {
        None
    }
}

pub fn status_line(line: &str, signal: Option<Signal>) -> String {
    paint(status_code(line, signal), line)
}

/// Color a requirement report line.
pub fn report_line(line: &str) -> String {
    paint(report_code(line), line)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
