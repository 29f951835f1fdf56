//! # ExecRS Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used around a process run:
//!
//! - **`io`**: configuration file reading and sink-file parent preparation.
//! - **`paths`**: resolution of (possibly home-relative) working directories
//!   into absolute paths.
//!
//! ```rust,ignore
//! use crate::common::fs::{io, paths};
//!
//! let cwd = paths::build_absolute_path_from_home("~/code/app")?;
//! io::ensure_parent_dir(Path::new("logs/build.out"))?;
//! ```
//!

/// Configuration file reading and sink directory preparation.
pub mod io;
/// Working directory resolution (`~` expansion, absolute paths).
pub mod paths;
