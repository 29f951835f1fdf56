//! # ExecRS Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads named command definitions and run defaults from TOML. Configuration
//! is optional: `execrs exec` works without any file, `execrs run` and
//! `execrs list` need at least one `[[commands]]` entry.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config <PATH>` (used alone when given)
//! 2. Project-specific `.execrs.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/execrs/config.toml`)
//!
//! Project defaults override user defaults field by field. Project commands
//! replace user commands with the same name; the rest are appended. After
//! merging, `~` is expanded in working directories and sink paths, and the
//! result is validated.
//!
//! ## Example
//!
//! ```toml
//! [defaults]
//! echo = "always"
//!
//! [[commands]]
//! name = "build"
//! executable = "cargo"
//! arguments = ["build", "--release"]
//! working_directory = "~/code/app"
//! stdout_file = "~/logs/build.out"
//! continue_on_failure = true
//! ```
//!
use crate::common::fs::io;
use crate::common::process::{CaptureMode, CommandSpec, EchoMode, OnFailure, OutputSink};
use crate::core::error::{ConfigError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".execrs.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: RunDefaults,
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

/// Settings applied to every command unless the command overrides them.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunDefaults {
    pub capture: Option<CaptureMode>,
    pub echo: Option<EchoMode>,
    pub on_failure: Option<OnFailure>,
    pub continue_on_failure: Option<bool>,
}

/// One named command (`[[commands]]`).
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    pub name: String,
    pub executable: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Working directory (can use ~).
    pub working_directory: Option<String>,
    /// File receiving a copy of stdout lines (can use ~).
    pub stdout_file: Option<String>,
    /// File receiving a copy of stderr lines (can use ~).
    pub stderr_file: Option<String>,
    pub capture: Option<CaptureMode>,
    pub echo: Option<EchoMode>,
    pub on_failure: Option<OnFailure>,
    pub continue_on_failure: Option<bool>,
}

impl CommandConfig {
    /// Builds the run description, filling unset policies from `defaults`.
    pub fn to_spec(&self, defaults: &RunDefaults) -> CommandSpec {
        CommandSpec {
            name: self.name.clone(),
            executable: self.executable.clone(),
            arguments: self.arguments.clone(),
            working_directory: self.working_directory.clone(),
            capture_mode: self.capture.or(defaults.capture).unwrap_or_default(),
            echo_mode: self.echo.or(defaults.echo).unwrap_or_default(),
            on_failure: self.on_failure.or(defaults.on_failure).unwrap_or_default(),
            continue_on_failure: self
                .continue_on_failure
                .or(defaults.continue_on_failure)
                .unwrap_or(false),
            stdout_sink: self
                .stdout_file
                .as_ref()
                .map(|p| OutputSink::File(PathBuf::from(p))),
            stderr_sink: self
                .stderr_file
                .as_ref()
                .map(|p| OutputSink::File(PathBuf::from(p))),
        }
    }
}

impl Config {
    pub fn find_command(&self, name: &str) -> Option<&CommandConfig> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Looks up each name, failing on the first unknown one.
    pub fn select_commands(&self, names: &[String]) -> Result<Vec<&CommandConfig>> {
        if names.is_empty() {
            return Ok(self.commands.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                self.find_command(name).ok_or_else(|| {
                    anyhow!(ConfigError::UnknownCommand { name: name.clone() })
                })
            })
            .collect()
    }
}

/// Loads, merges, expands and validates configuration.
///
/// With `explicit` set only that file is read and it must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            let project_config = load_project_config(&current_dir)?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ExecRS", "execrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.execrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = io::read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };

    let defaults = RunDefaults {
        capture: project.defaults.capture.or(user.defaults.capture),
        echo: project.defaults.echo.or(user.defaults.echo),
        on_failure: project.defaults.on_failure.or(user.defaults.on_failure),
        continue_on_failure: project
            .defaults
            .continue_on_failure
            .or(user.defaults.continue_on_failure),
    };

    let mut commands = user.commands;
    for command in project.commands {
        match commands.iter_mut().find(|c| c.name == command.name) {
            Some(existing) => *existing = command,
            None => commands.push(command),
        }
    }

    Config { defaults, commands }
}

fn expand_config_paths(config: &mut Config) {
    debug!("Expanding paths in configuration...");
    for command in &mut config.commands {
        for path in [
            &mut command.working_directory,
            &mut command.stdout_file,
            &mut command.stderr_file,
        ]
        .into_iter()
        .flatten()
        {
            *path = shellexpand::tilde(path.as_str()).into_owned();
        }
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();
    for command in &config.commands {
        if command.name.is_empty() {
            return Err(anyhow!(ConfigError::Invalid(format!(
                "A command with executable '{}' has an empty name.",
                command.executable
            ))));
        }
        if command.executable.is_empty() {
            return Err(anyhow!(ConfigError::Invalid(format!(
                "Command '{}' has an empty executable.",
                command.name
            ))));
        }
        if command.stderr_file.is_some()
            && command.to_spec(&config.defaults).capture_mode == CaptureMode::DiscardStderr
        {
            return Err(anyhow!(ConfigError::Invalid(format!(
                "Command '{}' sets stderr_file but discards stderr.",
                command.name
            ))));
        }
        if !seen.insert(command.name.as_str()) {
            return Err(anyhow!(ConfigError::Invalid(format!(
                "Command '{}' is defined more than once.",
                command.name
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
