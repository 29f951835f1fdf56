//! # ExecRS UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Minimal ANSI colour tagging for terminal output. Captured stdout lines are
//! mirrored in white, stderr lines and failure diagnostics in red.
//!
//! Colour is only applied when the destination is a terminal and the
//! `NO_COLOR` environment variable is unset; otherwise text passes through
//! unchanged. Callers decide once per destination with [`colors_enabled`] and
//! then call [`paint`] for every line.
//!
//! ```rust,ignore
//! use crate::common::ui::{self, Color, Target};
//!
//! let enabled = ui::colors_enabled(Target::Stderr);
//! eprintln!("{}", ui::paint("Command failed", Color::Red, enabled));
//! ```
//!
use std::io::IsTerminal;

const RESET: &str = "\x1b[0m";

/// Foreground colours used by ExecRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Red,
    Yellow,
    Green,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::White => "\x1b[37m",
            Color::Red => "\x1b[31m",
            Color::Yellow => "\x1b[33m",
            Color::Green => "\x1b[32m",
        }
    }
}

/// Terminal streams of the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
}

/// Whether colour codes should be written to `target`.
pub fn colors_enabled(target: Target) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match target {
        Target::Stdout => std::io::stdout().is_terminal(),
        Target::Stderr => std::io::stderr().is_terminal(),
    }
}

/// Wraps `text` in the escape codes for `color` when `enabled`.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color.code(), text, RESET)
    } else {
        text.to_string()
    }
}
