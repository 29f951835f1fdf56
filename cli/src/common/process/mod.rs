//! # ExecRS Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process/mod.rs
//!
//! ## Overview
//!
//! Launching an external program, capturing its stdout and stderr line by
//! line, and reporting success or failure with structured logging.
//!
//! ## Architecture
//!
//! - **`spec`**: [`CommandSpec`] plus the capture, echo and failure policies.
//! - **`runner`**: [`ProcessRunner`], which validates, spawns, drains and joins.
//! - **`capture`**: the per-stream drain task and output sinks.
//! - **`spawn`**: the [`Spawner`] seam between the runner and the OS.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use execrs::common::process::{CommandSpec, ProcessRunner, RunnerConfig};
//!
//! # async fn run_example() -> Result<(), execrs::core::error::ExecError> {
//! let runner = ProcessRunner::new(RunnerConfig { verbosity: 1 });
//! let spec = CommandSpec::new("git status", "git").arg("status");
//! let result = runner.run(&spec).await?;
//! if result.success() {
//!     println!("{}", result.stdout);
//! }
//! # Ok(())
//! # }
//! ```
//!

/// Per-stream line draining and output sinks.
pub mod capture;
/// Launching, capture wiring and outcome reporting.
pub mod runner;
/// Process creation seam.
pub mod spawn;
/// Command description and run policies.
pub mod spec;

pub use runner::{ProcessRunner, RunResult, RunnerConfig, TERMINATE_EXIT_CODE, TRACE_VERBOSITY};
pub use spawn::{Spawner, SystemSpawner};
pub use spec::{CaptureMode, CommandSpec, EchoMode, OnFailure, OutputSink};
