//! # Working Directory Resolution
//!
//! File: cli/src/common/fs/paths.rs
//!
//! Turns a user-supplied working directory into an absolute path before a
//! child is spawned:
//! - a leading `~` (alone, or followed by a separator) is replaced by the
//!   home directory,
//! - a relative result is joined onto the current directory,
//! - the result must name an existing directory.
//!
//! Any failure is an [`ExecError::PathResolution`], so the run stops before
//! the OS is asked to start anything.
//!
use crate::core::error::ExecError;
use std::path::{Path, PathBuf};

/// Resolves `path` to an absolute, existing directory.
pub fn build_absolute_path_from_home(path: &str) -> Result<PathBuf, ExecError> {
    let fail = |reason: String| ExecError::PathResolution {
        path: path.to_string(),
        reason,
    };

    let expanded = if has_home_prefix(path) {
        let home = dirs::home_dir()
            .ok_or_else(|| fail("home directory could not be determined".to_string()))?;
        let home = home.to_string_lossy().into_owned();
        shellexpand::tilde_with_context(path, || Some(home)).into_owned()
    } else {
        path.to_string()
    };

    let candidate = PathBuf::from(expanded);
    let absolute = if candidate.is_absolute() {
        candidate
    } else {
        std::env::current_dir()
            .map_err(|e| fail(format!("current directory unavailable: {}", e)))?
            .join(candidate)
    };

    check_directory(&absolute).map_err(fail)?;
    Ok(absolute)
}

fn has_home_prefix(path: &str) -> bool {
    path == "~" || path.starts_with("~/") || (cfg!(windows) && path.starts_with("~\\"))
}

fn check_directory(path: &Path) -> Result<(), String> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(format!("{} is not a directory", path.display())),
        Err(e) => Err(format!("{} is not accessible: {}", path.display(), e)),
    }
}
