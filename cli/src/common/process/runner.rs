//! # Process Runner (`common::process::runner`)
//!
//! File: cli/src/common/process/runner.rs
//!
//! ## Overview
//!
//! [`ProcessRunner::run`] executes one [`CommandSpec`] exactly once:
//!
//! 1. Validate the spec (all problems collected, nothing spawned on failure).
//! 2. Resolve the working directory.
//! 3. Open output sinks, attach pipes, spawn the child.
//! 4. Drain stdout and stderr in two Tokio tasks while the child runs.
//! 5. Join both drains *and* the child's exit, in whatever order they finish.
//! 6. Return a [`RunResult`], or apply the terminate policy.
//!
//! The runner carries its own [`RunnerConfig`] (verbosity); there is no
//! process-wide state, and every run owns its child handle and buffers.
//!
use crate::common::fs::paths;
use crate::common::process::capture::{
    drain_lines, LineDrain, LineSink, SharedBuffer, StreamKind,
};
use crate::common::process::spawn::{Spawner, SystemSpawner};
use crate::common::process::spec::{CaptureMode, CommandSpec, EchoMode, OnFailure, OutputSink};
use crate::common::ui::{self, Color, Target};
use crate::core::error::ExecError;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Verbosity at which captured lines are logged under [`EchoMode::OnTrace`].
pub const TRACE_VERBOSITY: u8 = 3;

/// Exit status of the host process when a terminate-mode run fails.
pub const TERMINATE_EXIT_CODE: i32 = 2;

/// Settings shared by every run of one runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    pub verbosity: u8,
}

/// Output and outcome of a process that was started.
#[derive(Debug)]
pub struct RunResult {
    /// Every captured stdout line followed by `\n` (both streams in combined mode).
    pub stdout: String,
    /// Every captured stderr line followed by `\n`; empty unless capture is separate.
    pub stderr: String,
    /// Exit code, `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Set when the child exited unsuccessfully.
    pub exit_error: Option<ExecError>,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.exit_error.is_none()
    }

    /// Converts an unsuccessful exit into `Err`.
    pub fn into_result(mut self) -> Result<RunResult, ExecError> {
        match self.exit_error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Launches and monitors child processes.
pub struct ProcessRunner<S = SystemSpawner> {
    config: RunnerConfig,
    spawner: S,
}

impl ProcessRunner<SystemSpawner> {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_spawner(config, SystemSpawner)
    }
}

impl<S: Spawner> ProcessRunner<S> {
    /// Builds a runner that creates children through `spawner`.
    pub fn with_spawner(config: RunnerConfig, spawner: S) -> Self {
        Self { config, spawner }
    }

    pub fn config(&self) -> RunnerConfig {
        self.config
    }

    /// Runs `spec` to completion.
    ///
    /// Failures that prevent the child from running (validation, working
    /// directory, sinks, pipes, start) are returned as `Err`. A child that
    /// ran but failed yields `Ok` with [`RunResult::exit_error`] set, so the
    /// output written before the failure is still available.
    ///
    /// Under [`OnFailure::Terminate`] without `continue_on_failure`, any
    /// failure ends the host process with [`TERMINATE_EXIT_CODE`] instead of
    /// returning.
    pub async fn run(&self, spec: &CommandSpec) -> Result<RunResult, ExecError> {
        info!(command = %spec.name, "Running command");

        let outcome = self.execute(spec).await;
        match &outcome {
            Ok(result) if result.success() => {
                info!(command = %spec.name, "Command succeeded");
            }
            Ok(result) => {
                warn!(
                    command = %spec.name,
                    exit_code = ?result.exit_code,
                    "Command execution failed"
                );
            }
            Err(e) => {
                warn!(command = %spec.name, error = %e, "Command execution failed");
            }
        }

        if spec.on_failure == OnFailure::Terminate && !spec.continue_on_failure {
            if let Some(message) = self.failure_diagnostic(spec, &outcome) {
                error!(command = %spec.name, "Command failed; terminating");
                let enabled = ui::colors_enabled(Target::Stderr);
                eprintln!("{}", ui::paint(message.trim_end(), Color::Red, enabled));
                std::process::exit(TERMINATE_EXIT_CODE);
            }
        }

        outcome
    }

    /// Text printed before terminating: captured stderr when verbose, a
    /// generic message otherwise. `None` when the run succeeded.
    fn failure_diagnostic(
        &self,
        spec: &CommandSpec,
        outcome: &Result<RunResult, ExecError>,
    ) -> Option<String> {
        let err = match outcome {
            Ok(result) => result.exit_error.as_ref()?,
            Err(e) => e,
        };
        if self.config.verbosity > 0 {
            if let Ok(result) = outcome {
                if !result.stderr.is_empty() {
                    return Some(result.stderr.clone());
                }
            }
            Some(err.to_string())
        } else {
            Some(format!("Command '{}' failed", spec.name))
        }
    }

    async fn execute(&self, spec: &CommandSpec) -> Result<RunResult, ExecError> {
        if let Err(messages) = spec.validate() {
            warn!(command = %spec.name, ?messages, "Command validation failed");
            return Err(ExecError::Validation { messages });
        }

        let mut command = Command::new(&spec.executable);
        command.args(&spec.arguments);

        if let Some(dir) = spec.effective_working_directory() {
            let resolved = paths::build_absolute_path_from_home(dir)?;
            debug!(
                command = %spec.name,
                "Set working directory to {}",
                resolved.display()
            );
            command.current_dir(resolved);
        }
        debug!(command = %spec.name, "Command: {}", spec.command_line());

        let discard_stderr = spec.capture_mode == CaptureMode::DiscardStderr;
        let stdout_sink = self.open_sink(spec, StreamKind::Stdout).await?;
        let stderr_sink = if discard_stderr {
            None
        } else {
            self.open_sink(spec, StreamKind::Stderr).await?
        };

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(if discard_stderr {
                Stdio::null()
            } else {
                Stdio::piped()
            })
            .kill_on_drop(true);

        let mut child = self.spawner.spawn(&mut command).map_err(|source| {
            warn!(command = %spec.name, error = %source, "Could not start process");
            ExecError::Start {
                executable: spec.executable.clone(),
                source,
            }
        })?;
        debug!(command = %spec.name, pid = ?child.id(), "Process started");

        let stdout_pipe = child.stdout.take().ok_or_else(|| {
            warn!(command = %spec.name, "Could not create stdout pipe");
            ExecError::PipeSetup { stream: "stdout" }
        })?;
        let stderr_pipe = if discard_stderr {
            None
        } else {
            Some(child.stderr.take().ok_or_else(|| {
                warn!(command = %spec.name, "Could not create stderr pipe");
                ExecError::PipeSetup { stream: "stderr" }
            })?)
        };

        let combined: Option<SharedBuffer> = (spec.capture_mode == CaptureMode::Combined)
            .then(|| Arc::new(Mutex::new(String::new())));
        let log_lines =
            spec.echo_mode == EchoMode::OnTrace && self.config.verbosity >= TRACE_VERBOSITY;

        let stdout_task = tokio::spawn(drain_lines(
            stdout_pipe,
            LineDrain {
                command: spec.name.clone(),
                stream: StreamKind::Stdout,
                log_lines,
                sink: stdout_sink,
                shared: combined.clone(),
            },
        ));
        let stderr_task = stderr_pipe.map(|pipe| {
            tokio::spawn(drain_lines(
                pipe,
                LineDrain {
                    command: spec.name.clone(),
                    stream: StreamKind::Stderr,
                    log_lines,
                    sink: stderr_sink,
                    shared: combined.clone(),
                },
            ))
        });
        let stderr_join = async move {
            match stderr_task {
                Some(handle) => handle.await.map(Some),
                None => Ok(None),
            }
        };

        // Exit and end-of-stream can arrive in either order; wait for all three.
        let (stdout_joined, stderr_joined, status) =
            tokio::join!(stdout_task, stderr_join, child.wait());

        let mut stdout = stdout_joined.map_err(|e| ExecError::Capture {
            stream: "stdout",
            reason: e.to_string(),
        })?;
        let stderr = stderr_joined
            .map_err(|e| ExecError::Capture {
                stream: "stderr",
                reason: e.to_string(),
            })?
            .unwrap_or_default();
        let status = status.map_err(|source| ExecError::Wait { source })?;

        if let Some(shared) = combined {
            let mut buffer = shared.lock().unwrap_or_else(|p| p.into_inner());
            stdout = std::mem::take(&mut *buffer);
        }

        Ok(build_result(spec, status, stdout, stderr))
    }

    /// Opens the sink for `stream`: the explicit one, else the terminal when
    /// echo is `always` and verbosity is above zero.
    async fn open_sink(
        &self,
        spec: &CommandSpec,
        stream: StreamKind,
    ) -> Result<Option<LineSink>, ExecError> {
        let explicit = match stream {
            StreamKind::Stdout => spec.stdout_sink.as_ref(),
            StreamKind::Stderr => spec.stderr_sink.as_ref(),
        };
        let sink = match explicit {
            Some(sink) => sink.clone(),
            None if spec.echo_mode == EchoMode::Always && self.config.verbosity > 0 => {
                OutputSink::Terminal
            }
            None => return Ok(None),
        };
        LineSink::open(&sink, stream).await.map(Some)
    }
}

fn build_result(
    spec: &CommandSpec,
    status: ExitStatus,
    stdout: String,
    stderr: String,
) -> RunResult {
    // Combined mode has no separate stderr; the merged text is the diagnostic.
    let diagnostic = match spec.capture_mode {
        CaptureMode::Combined => &stdout,
        _ => &stderr,
    };
    let exit_error = (!status.success()).then(|| ExecError::Exit {
        name: spec.name.clone(),
        status: status.to_string(),
        code: status.code(),
        stderr: diagnostic.clone(),
    });
    RunResult {
        stdout,
        stderr,
        exit_code: status.code(),
        exit_error,
    }
}
