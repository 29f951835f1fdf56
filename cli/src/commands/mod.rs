//! # ExecRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the subcommands of the `execrs` CLI. Each module defines its
//! own Clap arguments struct and an async `handle_*` function that receives
//! the parsed arguments plus the [`GlobalOptions`] shared by all subcommands.
//!
//! ## Commands
//!
//! - `exec`: Run one ad-hoc command given after `--`
//! - `run`: Run named commands from the configuration
//! - `list`: Show the configured commands
//!
use std::path::PathBuf;

/// Ad-hoc single command execution.
pub mod exec;
/// Listing of configured commands.
pub mod list;
/// Batch execution of configured commands.
pub mod run;

/// Options given before the subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Number of `-v` flags; also selects the log level.
    pub verbosity: u8,
    /// Explicit configuration file, bypassing discovery.
    pub config: Option<PathBuf>,
}
