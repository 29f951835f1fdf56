//! # ExecRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`main_tests.rs`, `exec.rs`,
//! `run.rs`). Every test file that is not a module like this one is compiled
//! as a separate test crate against the `execrs` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get ExecRS Command (`execrs_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `execrs` binary, running
/// inside `sandbox` with `HOME` and the XDG config directory pointed there so
/// no real user or project configuration leaks into the test.
///
/// ## Panics
/// Panics if the `execrs` binary cannot be found via `Command::cargo_bin`.
pub fn execrs_cmd(sandbox: &Path) -> Command {
    let mut cmd = Command::cargo_bin("execrs").expect("Failed to find execrs binary for testing");
    cmd.current_dir(sandbox)
        .env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("EXECRS_CONFIG")
        .env_remove("NO_COLOR");
    cmd
}

/// Creates an empty `.git` directory so config discovery stops at `sandbox`.
pub fn fence_repository(sandbox: &Path) {
    std::fs::create_dir_all(sandbox.join(".git")).expect("Failed to create .git fence");
}

/// Writes `.execrs.toml` into `sandbox`.
pub fn write_project_config(sandbox: &Path, content: &str) {
    fence_repository(sandbox);
    std::fs::write(sandbox.join(".execrs.toml"), content).expect("Failed to write .execrs.toml");
}
