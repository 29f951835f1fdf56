//! # Process Spawning Seam (`common::process::spawn`)
//!
//! File: cli/src/common/process/spawn.rs
//!
//! The runner never calls `Command::spawn` directly; it goes through a
//! [`Spawner`]. Production code uses [`SystemSpawner`], tests substitute a
//! counting spy to prove that rejected commands never reach the OS.
//!
use std::io;
use tokio::process::{Child, Command};

/// Creates a child process from a fully configured command.
pub trait Spawner: Send + Sync {
    fn spawn(&self, command: &mut Command) -> io::Result<Child>;
}

/// Spawns through the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn(&self, command: &mut Command) -> io::Result<Child> {
        command.spawn()
    }
}
