//! # ExecRS
//!
//! File: cli/src/lib.rs
//!
//! Library half of the `execrs` crate. The binary in `main.rs` is a thin
//! front end over these modules; other crates can use the process runner
//! directly:
//!
//! ```rust,no_run
//! use execrs::common::process::{CommandSpec, ProcessRunner, RunnerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let runner = ProcessRunner::new(RunnerConfig::default());
//! let result = runner.run(&CommandSpec::new("greet", "echo").arg("hi")).await?;
//! assert_eq!(result.stdout, "hi\n");
//! # Ok(())
//! # }
//! ```
//!
pub mod commands; // Handlers for `exec`, `run`, `list`
pub mod common; // Shared utilities (process, fs, ui)
pub mod core; // Core infrastructure (errors, config)
