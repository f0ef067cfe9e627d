//! # plens-cli: CLI Tool for platform-lens
//!
//! Provides the `plens` command-line interface over an election dataset.
//!
//! ## Subcommands
//!
//! - `plens validate`: Structural validation report. Also what a bare
//!   `plens` runs.
//! - `plens options`: Profession and topic filter options.
//! - `plens compare`: Plain-text comparison of party platforms and the
//!   candidates of a district.
//! - `plens schema`: Print the dataset's JSON Schema or check against it.
//!
//! ## Dataset Location
//!
//! `--data <PATH>` wins, then the `PLENS_DATA` environment variable, then
//! `election_data.json` in the directory of the running executable.
//!
//! ```bash
//! plens
//! plens --data ./election_data.json validate --format json
//! plens compare --profession Nurse --topic Tax --district "Harbor 1"
//! plens compare --all --format json
//! ```

pub mod compare;
pub mod options;
pub mod report;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use plens_core::DEFAULT_DATASET_FILE;

/// Environment variable that overrides the dataset location.
pub const DATA_ENV: &str = "PLENS_DATA";

/// Output format for commands that support machine-readable output.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON document on stdout.
    Json,
}

/// Format of the log lines written to stderr.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Resolve the dataset path.
///
/// An explicit path (from `--data` or `PLENS_DATA`) is used as-is.
/// Otherwise the dataset is expected next to the running executable.
pub fn resolve_dataset_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let exe = std::env::current_exe().context("cannot determine executable location")?;
    Ok(dataset_beside(&exe))
}

/// `election_data.json` in the directory containing `program`.
pub fn dataset_beside(program: &Path) -> PathBuf {
    program
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_DATASET_FILE)
}
