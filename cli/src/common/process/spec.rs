//! # ExecRS Command Description (`common::process::spec`)
//!
//! File: cli/src/common/process/spec.rs
//!
//! ## Overview
//!
//! Defines [`CommandSpec`], the description of one process to launch, and the
//! policy enums that select how a run captures, echoes, and reacts to failure.
//! A `CommandSpec` is built by the caller, handed to
//! [`ProcessRunner::run`](super::runner::ProcessRunner::run) and can be reused
//! freely: the runner never mutates it and keeps no state between runs.
//!
//! The policy enums derive both `serde::Deserialize` (for `.execrs.toml`) and
//! `clap::ValueEnum` (for `execrs exec` flags), so the same kebab-case names
//! are accepted in both places: `separate`, `combined`, `discard-stderr`,
//! `silent`, `on-trace`, `always`, `return-error`, `terminate`.
//!
use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// How the child's output streams are retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// stdout and stderr are captured into their own buffers.
    #[default]
    Separate,
    /// Lines from both streams land in the stdout buffer, in arrival order.
    Combined,
    /// stderr is connected to the null device and never captured.
    DiscardStderr,
}

/// Where captured lines are echoed while the child runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EchoMode {
    /// Lines are only buffered.
    Silent,
    /// Lines are logged when the runner's verbosity reaches the trace threshold.
    #[default]
    OnTrace,
    /// Lines are mirrored to this process's stdout/stderr when verbosity > 0.
    Always,
}

/// What a failed run does to the host process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OnFailure {
    /// The failure is returned to the caller.
    #[default]
    ReturnError,
    /// The host process exits with status 2 unless `continue_on_failure` is set.
    Terminate,
}

/// Additional destination for the lines of one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// The matching stream of this process, colour-tagged when it is a terminal.
    Terminal,
    /// A file, created (or truncated) before the child is spawned.
    File(PathBuf),
}

/// Description of a single process to launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Label used to correlate log records. Required.
    pub name: String,
    /// Program path, or a bare name looked up through `PATH`. Required.
    pub executable: String,
    /// Arguments passed verbatim to the child.
    pub arguments: Vec<String>,
    /// Working directory; may start with `~`. Inherited when `None` or empty.
    pub working_directory: Option<String>,
    pub capture_mode: CaptureMode,
    pub echo_mode: EchoMode,
    pub on_failure: OnFailure,
    /// Suppresses termination under [`OnFailure::Terminate`].
    pub continue_on_failure: bool,
    pub stdout_sink: Option<OutputSink>,
    pub stderr_sink: Option<OutputSink>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executable: executable.into(),
            ..Default::default()
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn capture_mode(mut self, mode: CaptureMode) -> Self {
        self.capture_mode = mode;
        self
    }

    pub fn echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    pub fn on_failure(mut self, policy: OnFailure) -> Self {
        self.on_failure = policy;
        self
    }

    pub fn continue_on_failure(mut self, value: bool) -> Self {
        self.continue_on_failure = value;
        self
    }

    pub fn stdout_sink(mut self, sink: OutputSink) -> Self {
        self.stdout_sink = Some(sink);
        self
    }

    pub fn stderr_sink(mut self, sink: OutputSink) -> Self {
        self.stderr_sink = Some(sink);
        self
    }

    /// Checks the required fields, collecting every problem rather than the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut messages = Vec::new();
        if self.name.is_empty() {
            messages.push("Name property is required".to_string());
        }
        if self.executable.is_empty() {
            messages.push("Executable must be specified".to_string());
        }
        if self.capture_mode == CaptureMode::DiscardStderr && self.stderr_sink.is_some() {
            messages.push("A stderr sink cannot be used when stderr is discarded".to_string());
        }
        if messages.is_empty() {
            Ok(())
        } else {
            Err(messages)
        }
    }

    /// The working directory, if one was given and is non-empty.
    pub fn effective_working_directory(&self) -> Option<&str> {
        self.working_directory
            .as_deref()
            .filter(|dir| !dir.is_empty())
    }

    /// Executable and arguments as one display string, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.executable.as_str())
            .chain(self.arguments.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_collects_all_messages() {
        let spec = CommandSpec::default();
        let messages = spec.validate().unwrap_err();
        assert_eq!(
            messages,
            vec![
                "Name property is required".to_string(),
                "Executable must be specified".to_string()
            ]
        );
    }

    #[test]
    fn test_validate_single_missing_field() {
        let messages = CommandSpec::new("", "echo").validate().unwrap_err();
        assert_eq!(messages, vec!["Name property is required".to_string()]);

        let messages = CommandSpec::new("greet", "").validate().unwrap_err();
        assert_eq!(messages, vec!["Executable must be specified".to_string()]);

        assert!(CommandSpec::new("greet", "echo").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_stderr_sink_when_discarding() {
        let spec = CommandSpec::new("quiet", "echo")
            .capture_mode(CaptureMode::DiscardStderr)
            .stderr_sink(OutputSink::File(PathBuf::from("err.log")));
        assert_eq!(
            spec.validate().unwrap_err(),
            vec!["A stderr sink cannot be used when stderr is discarded".to_string()]
        );

        let spec = CommandSpec::new("quiet", "echo")
            .capture_mode(CaptureMode::DiscardStderr)
            .stdout_sink(OutputSink::File(PathBuf::from("out.log")));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_builder_and_command_line() {
        let spec = CommandSpec::new("greet", "echo")
            .arg("It")
            .args(["works!"])
            .working_directory("")
            .capture_mode(CaptureMode::Combined);
        assert_eq!(spec.arguments, vec!["It", "works!"]);
        assert_eq!(spec.command_line(), "echo It works!");
        assert_eq!(spec.effective_working_directory(), None);
        assert_eq!(spec.capture_mode, CaptureMode::Combined);
        assert_eq!(spec.echo_mode, EchoMode::OnTrace);
        assert_eq!(spec.on_failure, OnFailure::ReturnError);
    }

    #[test]
    fn test_modes_deserialize_kebab_case() {
        #[derive(Deserialize)]
        struct Modes {
            capture: CaptureMode,
            echo: EchoMode,
            on_failure: OnFailure,
        }
        let modes: Modes = toml::from_str(
            r#"
                capture = "discard-stderr"
                echo = "always"
                on_failure = "terminate"
            "#,
        )
        .expect("Failed to parse modes");
        assert_eq!(modes.capture, CaptureMode::DiscardStderr);
        assert_eq!(modes.echo, EchoMode::Always);
        assert_eq!(modes.on_failure, OnFailure::Terminate);
    }
}
