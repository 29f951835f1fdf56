//! # ExecRS Exec Command Handler
//!
//! File: cli/src/commands/exec.rs
//!
//! ## Overview
//!
//! Implements `execrs exec`, which runs one ad-hoc command given after `--`
//! through the [`ProcessRunner`]. Policies not given on the command line fall
//! back to the `[defaults]` table of the loaded configuration.
//!
//! ## Usage
//!
//! ```bash
//! # Run and print the captured output afterwards
//! execrs exec --print -- echo "It works!"
//!
//! # Mirror output live and exit with status 2 if the command fails
//! execrs -v exec --echo always --on-failure terminate -- make test
//!
//! # Keep a copy of stderr in a file, resolved relative to the home directory
//! execrs exec --workdir ~/code/app --stderr-file ~/logs/app.err -- cargo build
//! ```
//!
use crate::commands::GlobalOptions;
use crate::common::process::{
    CaptureMode, CommandSpec, EchoMode, OnFailure, OutputSink, ProcessRunner, RunnerConfig,
};
use crate::core::{
    config::{self, RunDefaults},
    error::Result,
};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments for `execrs exec`.
#[derive(Parser, Debug)]
#[command(
    about = "Run a single command and capture its output",
    long_about = "Spawns the command given after `--`, drains stdout and stderr concurrently, and reports success or failure."
)]
pub struct ExecArgs {
    /// Label used in log records (defaults to the executable).
    #[arg(long)]
    name: Option<String>,

    /// Working directory for the command; `~` is expanded.
    #[arg(long, short = 'w', value_name = "DIR")]
    workdir: Option<String>,

    /// How stdout/stderr are retained.
    #[arg(long, value_enum)]
    capture: Option<CaptureMode>,

    /// Where lines are echoed while the command runs.
    #[arg(long, value_enum)]
    echo: Option<EchoMode>,

    /// Whether a failure ends this process (status 2) or is reported normally.
    #[arg(long, value_enum)]
    on_failure: Option<OnFailure>,

    /// Do not terminate on failure even with `--on-failure terminate`.
    #[arg(long)]
    continue_on_failure: bool,

    /// Copy stdout lines into this file.
    #[arg(long, value_name = "FILE")]
    stdout_file: Option<PathBuf>,

    /// Copy stderr lines into this file.
    #[arg(long, value_name = "FILE")]
    stderr_file: Option<PathBuf>,

    /// Print the captured stdout and stderr after the command finishes.
    #[arg(long)]
    print: bool,

    /// The executable followed by its arguments.
    #[arg(required = true, last = true)]
    command: Vec<String>,
}

impl ExecArgs {
    /// Builds the run description, using `defaults` for unset policies.
    fn to_spec(&self, defaults: &RunDefaults) -> CommandSpec {
        let (executable, arguments) = match self.command.split_first() {
            Some((exe, rest)) => (exe.clone(), rest.to_vec()),
            None => (String::new(), Vec::new()),
        };
        CommandSpec {
            name: self.name.clone().unwrap_or_else(|| executable.clone()),
            executable,
            arguments,
            working_directory: self.workdir.clone(),
            capture_mode: self.capture.or(defaults.capture).unwrap_or_default(),
            echo_mode: self.echo.or(defaults.echo).unwrap_or_default(),
            on_failure: self.on_failure.or(defaults.on_failure).unwrap_or_default(),
            continue_on_failure: self.continue_on_failure
                || defaults.continue_on_failure.unwrap_or(false),
            stdout_sink: self.stdout_file.clone().map(OutputSink::File),
            stderr_sink: self.stderr_file.clone().map(OutputSink::File),
        }
    }
}

/// Handler for `execrs exec`.
///
/// Returns `Err` when the run could not start or the command exited
/// unsuccessfully (unless the terminate policy already ended the process).
pub async fn handle_exec(args: ExecArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling exec command...");
    debug!("Exec args: {:?}", args);

    let cfg = config::load_config(global.config.as_deref())
        .context("Failed to load ExecRS configuration")?;
    let spec = args.to_spec(&cfg.defaults);

    let runner = ProcessRunner::new(RunnerConfig {
        verbosity: global.verbosity,
    });
    let result = runner.run(&spec).await?;

    if args.print {
        print!("{}", result.stdout);
        eprint!("{}", result.stderr);
    }

    match result.exit_error {
        Some(err) if spec.continue_on_failure => {
            info!(command = %spec.name, error = %err, "Failure tolerated (continue on failure)");
            Ok(())
        }
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
