//! # ExecRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utility modules used by the command handlers:
//!
//! - **`fs`**: Working directory resolution and small file helpers.
//! - **`process`**: The process runner: launching a child, capturing its
//!   output concurrently, and reporting the outcome.
//! - **`ui`**: ANSI colour tagging for terminal output.
//!

/// Utilities for filesystem operations (path resolution, config and sink files).
pub mod fs;
/// Executing external processes and capturing their output.
pub mod process;
/// Terminal colour helpers.
pub mod ui;
