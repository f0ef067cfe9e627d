//! # Options Subcommand
//!
//! Lists the profession and topic filter options: the sorted union of keys
//! across all parties. Loads the way a display layer does, degrading to an
//! empty dataset when the file cannot be loaded.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use plens_core::{load_or_empty, Catalog};

use crate::OutputFormat;

/// Arguments for the `plens options` subcommand.
#[derive(Args, Debug, Default)]
pub struct OptionsArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct FilterOptions {
    professions: Vec<String>,
    topics: Vec<String>,
    districts: Vec<String>,
}

/// Execute the options subcommand, printing to stdout.
pub fn run_options(args: &OptionsArgs, dataset: &Path) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    options_to(args, dataset, &mut out)
}

/// Execute the options subcommand, writing to `out`.
///
/// A load failure is reported on stderr; the (empty) options are still
/// printed and the exit code is 1.
pub fn options_to(args: &OptionsArgs, dataset: &Path, out: &mut impl Write) -> Result<u8> {
    let outcome = load_or_empty(dataset);
    if let Some(err) = &outcome.failure {
        eprintln!("{err}");
    }

    let catalog = Catalog::new(&outcome.dataset);
    let options = FilterOptions {
        professions: catalog.profession_options(),
        topics: catalog.topic_options(),
        districts: catalog
            .district_names()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    };

    match args.format {
        OutputFormat::Text => {
            write_section(out, "Professions", &options.professions)?;
            write_section(out, "Topics", &options.topics)?;
            write_section(out, "Districts", &options.districts)?;
        }
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&options).context("failed to serialize options")?;
            writeln!(out, "{rendered}").context("failed to write options")?;
        }
    }

    Ok(if outcome.failure.is_some() { 1 } else { 0 })
}

fn write_section(out: &mut impl Write, title: &str, items: &[String]) -> Result<()> {
    writeln!(out, "{title} ({}):", items.len()).context("failed to write options")?;
    for item in items {
        writeln!(out, "  {item}").context("failed to write options")?;
    }
    Ok(())
}
