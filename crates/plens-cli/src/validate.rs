//! # Validate Subcommand
//!
//! Loads the dataset, runs the structural validator and prints the report.
//!
//! Exit codes: 0 when there are no errors (warnings allowed), 1 when the
//! file is missing, unreadable, malformed, or has at least one structural
//! error.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use plens_core::load_dataset;
use plens_schema::ValidationReport;

use crate::report::{render_json, render_load_failure_json, render_load_failure_text, render_text};
use crate::OutputFormat;

/// Arguments for the `plens validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the validate subcommand, printing to stdout.
///
/// Returns the process exit code.
pub fn run_validate(args: &ValidateArgs, dataset: &Path) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    validate_to(args, dataset, &mut out)
}

/// Execute the validate subcommand, writing the report to `out`.
pub fn validate_to(args: &ValidateArgs, dataset: &Path, out: &mut impl Write) -> Result<u8> {
    tracing::info!(dataset = %dataset.display(), "validating dataset");

    let tree = match load_dataset(dataset) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::debug!(kind = err.kind().as_str(), "dataset load failed");
            let rendered = match args.format {
                OutputFormat::Text => render_load_failure_text(&err),
                OutputFormat::Json => render_load_failure_json(&err, dataset)
                    .context("failed to serialize load failure")?
                    + "\n",
            };
            out.write_all(rendered.as_bytes())
                .context("failed to write report")?;
            return Ok(1);
        }
    };

    let report = match ValidationReport::generate(&tree) {
        Ok(report) => report,
        Err(err) => {
            writeln!(out, "Validation error: {err}").context("failed to write report")?;
            return Ok(1);
        }
    };

    let rendered = match args.format {
        OutputFormat::Text => render_text(&report, dataset),
        OutputFormat::Json => {
            render_json(&report, dataset).context("failed to serialize report")? + "\n"
        }
    };
    out.write_all(rendered.as_bytes())
        .context("failed to write report")?;

    Ok(report.exit_code())
}
