//! # ExecRS Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the ExecRS CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! execrs --help
//!
//! # Run an ad-hoc command, logging every captured line
//! execrs -vvv exec -- ls -la
//!
//! # Run configured commands
//! execrs run build test
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur (exit status 1)
//!
use clap::Parser;
use execrs::commands::{self, GlobalOptions};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "execrs",
    about = "ExecRS: run external commands with captured output and structured logging",
    long_about = "Launches external processes, drains stdout and stderr concurrently,\n\
                  and reports success or failure consistently.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v warn, -vv info, -vvv line logging, -vvvv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Use this configuration file instead of discovering one.
    #[arg(long, global = true, value_name = "PATH", env = "EXECRS_CONFIG")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "x")]
    Exec(commands::exec::ExecArgs),
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
}

/// Minimum log level for a verbosity count.
fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 | 3 => "info",
        _ => "debug",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose)));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let global = GlobalOptions {
        verbosity: cli.verbose,
        config: cli.config,
    };

    let command_result = match cli.command {
        Commands::Exec(args) => commands::exec::handle_exec(args, &global).await,
        Commands::Run(args) => commands::run::handle_run(args, &global).await,
        Commands::List(args) => commands::list::handle_list(args, &global).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(log_level(0), "error");
        assert_eq!(log_level(1), "warn");
        assert_eq!(log_level(2), "info");
        assert_eq!(log_level(3), "info");
        assert_eq!(log_level(4), "debug");
        assert_eq!(log_level(9), "debug");
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["execrs", "exec", "-vvv", "--", "echo", "hi"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(matches!(cli.command, Commands::Exec(_)));
    }
}
