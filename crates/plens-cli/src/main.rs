//! # plens CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! With no subcommand, runs `validate` against the default dataset.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use plens_cli::compare::{run_compare, CompareArgs};
use plens_cli::options::{run_options, OptionsArgs};
use plens_cli::{resolve_dataset_path, LogFormat, DATA_ENV};
use plens_cli::schema::{run_schema, SchemaArgs};
use plens_cli::validate::{run_validate, ValidateArgs};

/// platform-lens: compare party platforms and district candidates from an
/// election dataset, and validate that dataset.
#[derive(Parser, Debug)]
#[command(name = "plens", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the election dataset. Defaults to election_data.json next to
    /// the executable.
    #[arg(long, global = true, env = DATA_ENV, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Log line format on stderr.
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the dataset structure and print a report (default).
    Validate(ValidateArgs),

    /// List the profession, topic and district filter options.
    Options(OptionsArgs),

    /// Compare party policies for selected professions and topics.
    Compare(CompareArgs),

    /// Print the dataset JSON Schema, or check the dataset against it.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    tracing::debug!("plens v{} starting", env!("CARGO_PKG_VERSION"));

    let dataset = match resolve_dataset_path(cli.data.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    tracing::debug!(dataset = %dataset.display(), "resolved dataset path");

    let result = match cli.command {
        None => run_validate(&ValidateArgs::default(), &dataset),
        Some(Commands::Validate(args)) => run_validate(&args, &dataset),
        Some(Commands::Options(args)) => run_options(&args, &dataset),
        Some(Commands::Compare(args)) => run_compare(&args, &dataset),
        Some(Commands::Schema(args)) => run_schema(&args, &dataset),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
