//! # ExecRS List Command Handler
//!
//! File: cli/src/commands/list.rs
//!
//! Implements `execrs list`: prints every configured command with its command
//! line, working directory and effective failure policy.
//!
use crate::commands::GlobalOptions;
use crate::core::{
    config::{self, Config},
    error::Result,
};
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Arguments for `execrs list`.
#[derive(Parser, Debug)]
#[command(about = "List commands defined in the configuration")]
pub struct ListArgs {}

/// Handler for `execrs list`.
pub async fn handle_list(_args: ListArgs, global: &GlobalOptions) -> Result<()> {
    info!("Handling list command...");
    let cfg = config::load_config(global.config.as_deref())
        .context("Failed to load ExecRS configuration")?;
    print!("{}", render_listing(&cfg));
    Ok(())
}

fn render_listing(cfg: &Config) -> String {
    if cfg.commands.is_empty() {
        return "No commands configured.\n".to_string();
    }
    let mut out = format!("Configured commands ({}):\n", cfg.commands.len());
    for command in &cfg.commands {
        let spec = command.to_spec(&cfg.defaults);
        out.push_str(&format!("  - {}: {}\n", spec.name, spec.command_line()));
        if let Some(dir) = spec.effective_working_directory() {
            out.push_str(&format!("      working_directory: {}\n", dir));
        }
        out.push_str(&format!(
            "      capture: {:?}, echo: {:?}, on_failure: {:?}, continue_on_failure: {}\n",
            spec.capture_mode, spec.echo_mode, spec.on_failure, spec.continue_on_failure
        ));
    }
    out
}
