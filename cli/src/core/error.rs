//! # ExecRS Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ExecRS. The process
//! runner reports every failure through a single typed value, [`ExecError`],
//! so callers can match on the failure class and decide whether it is fatal.
//!
//! ## Architecture
//!
//! The error system consists of three components:
//! - `ExecError`: A `thiserror` enum describing why a run failed
//! - `ConfigError`: Problems in `.execrs.toml` / user configuration
//! - `Result<T>`: A type alias for `anyhow::Result<T>` used by configuration
//!   loading and the CLI handlers, where context matters more than the type
//!
//! The `ExecError` variants follow the lifecycle of a run:
//! - Validation of the command description (before any OS interaction)
//! - Working directory resolution
//! - Output sink and pipe setup
//! - Process start
//! - Output capture and waiting
//! - Process exit status
//!
//! ## Examples
//!
//! ```rust,ignore
//! match runner.run(&spec).await {
//!     Ok(result) if result.success() => println!("{}", result.stdout),
//!     Ok(result) => eprintln!("{}", result.exit_error.unwrap()),
//!     Err(ExecError::Validation { messages }) => eprintln!("{:?}", messages),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single process run.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Command validation failed: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("Could not resolve working directory '{path}': {reason}")]
    PathResolution { path: String, reason: String },

    #[error("Could not open output sink '{}': {reason}", path.display())]
    Sink { path: PathBuf, reason: String },

    #[error("Could not create {stream} pipe")]
    PipeSetup { stream: &'static str },

    #[error("Could not start process '{executable}': {source}")]
    Start {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("Capture of {stream} aborted: {reason}")]
    Capture { stream: &'static str, reason: String },

    #[error("Failed waiting for process: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },

    #[error("Command '{name}' failed, Status: {status}, Stderr:\n{stderr}")]
    Exit {
        name: String,
        status: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl ExecError {
    /// Exit code of the child, when the failure is an exit failure that carried one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

/// Problems found while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Command '{name}' is not defined in the configuration.")]
    UnknownCommand { name: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
