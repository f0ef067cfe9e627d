//! # Schema Subcommand
//!
//! Prints the dataset's JSON Schema contract, or checks the dataset against
//! it with `--check`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use plens_core::load_dataset;
use plens_schema::contract::DATASET_SCHEMA;
use plens_schema::{ContractError, DatasetSchema};

/// Arguments for the `plens schema` subcommand.
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Check the dataset against the schema instead of printing it.
    #[arg(long)]
    pub check: bool,
}

/// Execute the schema subcommand, printing to stdout.
pub fn run_schema(args: &SchemaArgs, dataset: &Path) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    schema_to(args, dataset, &mut out)
}

/// Execute the schema subcommand, writing to `out`.
pub fn schema_to(args: &SchemaArgs, dataset: &Path, out: &mut impl Write) -> Result<u8> {
    if !args.check {
        out.write_all(DATASET_SCHEMA.as_bytes())
            .context("failed to write schema")?;
        return Ok(0);
    }

    let tree = match load_dataset(dataset) {
        Ok(tree) => tree,
        Err(err) => {
            writeln!(out, "{err}").context("failed to write result")?;
            return Ok(1);
        }
    };

    let schema = DatasetSchema::new().context("failed to compile dataset schema")?;
    match schema.check(&tree) {
        Ok(()) => {
            writeln!(out, "OK: {} conforms to the dataset schema", dataset.display())
                .context("failed to write result")?;
            Ok(0)
        }
        Err(ContractError::ValidationFailed { violations, .. }) => {
            writeln!(
                out,
                "FAIL: {} has {} schema violation(s)\n{violations}",
                dataset.display(),
                violations.len()
            )
            .context("failed to write result")?;
            Ok(1)
        }
        Err(other) => Err(anyhow::Error::new(other).context("schema check failed")),
    }
}
