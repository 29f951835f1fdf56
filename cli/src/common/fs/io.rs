//! # ExecRS Filesystem I/O Helpers
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used outside the hot path of a run:
//! - **`read_file_to_string`**: reads a configuration file, adding the path to
//!   any error via `anyhow::Context`.
//! - **`ensure_parent_dir`**: makes sure the directory that will hold an
//!   output sink file exists (like `mkdir -p` on the parent), rejecting a
//!   parent path that exists but is not a directory.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be opened or read, with context naming
/// the file.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Ensures the parent directory of `path` exists, creating it if needed.
///
/// Paths without a parent component (e.g. `out.log`) need nothing.
///
/// # Errors
///
/// Returns an `Err` if the parent exists but is not a directory, or if it
/// cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
        debug!("Created sink directory: {:?}", parent);
    } else if !parent.is_dir() {
        anyhow::bail!("Path exists but is not a directory: {:?}", parent);
    }
    Ok(())
}
