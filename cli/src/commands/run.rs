//! # ExecRS Run Command Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `execrs run`, which executes named commands from the
//! configuration in order (all of them when no names are given).
//!
//! Each command's failure policy decides what happens next:
//! - `continue_on_failure = true`: the failure is reported and the next
//!   command runs.
//! - `on_failure = "terminate"`: the process exits with status 2 right away.
//! - otherwise: the batch stops and the error is returned.
//!
//! ## Usage
//!
//! ```bash
//! execrs run              # every configured command
//! execrs run build test   # only these, in this order
//! execrs -vvv run build   # also log every captured line
//! ```
//!
use crate::commands::GlobalOptions;
use crate::common::process::{ProcessRunner, RunnerConfig};
use crate::common::ui::{self, Color, Target};
use crate::core::{config, error::Result};
use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info, warn};

/// Arguments for `execrs run`.
#[derive(Parser, Debug)]
#[command(about = "Run commands defined in the configuration")]
pub struct RunArgs {
    /// Names of configured commands to run (all when omitted).
    names: Vec<String>,

    /// Print each command's captured stdout and stderr after it finishes.
    #[arg(long)]
    print: bool,
}

/// Handler for `execrs run`.
pub async fn handle_run(args: RunArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling run command...");
    debug!("Run args: {:?}", args);

    let cfg = config::load_config(global.config.as_deref())
        .context("Failed to load ExecRS configuration")?;
    if cfg.commands.is_empty() {
        bail!("No commands configured. Add [[commands]] entries to .execrs.toml.");
    }
    let selected = cfg.select_commands(&args.names)?;

    let runner = ProcessRunner::new(RunnerConfig {
        verbosity: global.verbosity,
    });
    let colors = ui::colors_enabled(Target::Stdout);
    let mut tolerated = Vec::new();

    for command in &selected {
        let spec = command.to_spec(&cfg.defaults);
        let outcome = runner.run(&spec).await;

        if args.print {
            if let Ok(result) = &outcome {
                print!("{}", result.stdout);
                eprint!("{}", result.stderr);
            }
        }

        let failure = match outcome {
            Ok(result) => result.exit_error,
            Err(e) => Some(e),
        };
        match failure {
            None => {
                let line = format!("[ok] {}", spec.name);
                println!("{}", ui::paint(&line, Color::Green, colors));
            }
            Some(err) if spec.continue_on_failure => {
                warn!(command = %spec.name, error = %err, "Continuing after failure");
                let line = format!("[failed] {} (continuing)", spec.name);
                println!("{}", ui::paint(&line, Color::Yellow, colors));
                tolerated.push(spec.name);
            }
            Some(err) => {
                let line = format!("[failed] {}", spec.name);
                println!("{}", ui::paint(&line, Color::Red, colors));
                let context = format!("Command '{}' failed", spec.name);
                return Err(anyhow::Error::new(err).context(context));
            }
        }
    }

    if tolerated.is_empty() {
        info!("All {} command(s) succeeded", selected.len());
    } else {
        println!(
            "{} of {} command(s) failed: {}",
            tolerated.len(),
            selected.len(),
            tolerated.join(", ")
        );
    }
    Ok(())
}
