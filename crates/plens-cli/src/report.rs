//! # Report Rendering
//!
//! Turns a [`ValidationReport`] or a load failure into what `plens validate`
//! prints: a framed text report for people, or a JSON document for
//! automation.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use plens_core::LoadError;
use plens_schema::{DatasetStatistics, ExplanationCoverage, Outcome, ValidationReport};

const RULE_WIDTH: usize = 70;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render the full text report.
pub fn render_text(report: &ValidationReport, dataset: &Path) -> String {
    let mut out = String::new();
    let rule = rule();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Dataset validation report: {}", dataset.display());
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);

    render_statistics(&mut out, &report.statistics);
    let _ = writeln!(out);

    let _ = writeln!(out, "Validation results:");
    match report.outcome {
        Outcome::Clean => render_clean(&mut out, &report.statistics),
        Outcome::WarningsOnly | Outcome::ErrorsPresent => render_findings(&mut out, report),
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    out
}

fn render_statistics(out: &mut String, stats: &DatasetStatistics) {
    let _ = writeln!(out, "Statistics:");
    let _ = writeln!(out, "  Parties: {}", stats.parties_count);
    let _ = writeln!(
        out,
        "  Parties with explanations: {}/{}",
        stats.parties_with_explanations, stats.parties_count
    );
    let _ = writeln!(out, "  Profession categories: {}", stats.professions.len());
    if !stats.professions.is_empty() {
        let joined: Vec<&str> = stats.professions.iter().map(String::as_str).collect();
        let _ = writeln!(out, "    -> {}", joined.join(", "));
    }
    let _ = writeln!(out, "  General policy topics: {}", stats.general_topics.len());
    if !stats.general_topics.is_empty() {
        let joined: Vec<&str> = stats.general_topics.iter().map(String::as_str).collect();
        let _ = writeln!(out, "    -> {}", joined.join(", "));
    }
    let _ = writeln!(out, "  Districts: {}", stats.districts_count);
    let _ = writeln!(out, "  Total candidates: {}", stats.total_candidates);
}

fn render_clean(out: &mut String, stats: &DatasetStatistics) {
    let _ = writeln!(out, "  All checks passed!");
    let _ = writeln!(out);
    match stats.explanation_coverage() {
        ExplanationCoverage::None => {
            let _ = writeln!(
                out,
                "  No explanation data yet. The dataset works without it, but"
            );
            let _ = writeln!(
                out,
                "  personalized_explanations and general_explanations make the"
            );
            let _ = writeln!(out, "  comparison much easier to follow.");
        }
        ExplanationCoverage::Partial { missing } => {
            let _ = writeln!(
                out,
                "  {missing} of {} parties have no explanations.",
                stats.parties_count
            );
            let _ = writeln!(
                out,
                "  Adding explanations to every party makes the comparison more helpful."
            );
        }
        ExplanationCoverage::Complete => {
            let _ = writeln!(out, "  Every party includes detailed explanations.");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  Run `plens compare` to browse the platforms.");
}

fn render_findings(out: &mut String, report: &ValidationReport) {
    let diagnostics = &report.diagnostics;
    let _ = writeln!(out, "  Errors: {}", diagnostics.error_count());
    let _ = writeln!(out, "  Warnings: {}", diagnostics.warning_count());
    let _ = writeln!(out);

    if diagnostics.has_errors() {
        let _ = writeln!(out, "  [Errors] Fix the following:");
        for d in diagnostics.errors() {
            let _ = writeln!(out, "    {d}");
        }
        let _ = writeln!(out);
    }

    if diagnostics.warning_count() > 0 {
        let _ = writeln!(
            out,
            "  [Warnings] These may not break anything, but should be reviewed:"
        );
        for d in diagnostics.warnings() {
            let _ = writeln!(out, "    {d}");
        }
        let _ = writeln!(out);
    }

    if report.outcome == Outcome::ErrorsPresent {
        let _ = writeln!(
            out,
            "  Errors present: consumers may not work correctly with this dataset."
        );
    } else {
        let _ = writeln!(
            out,
            "  Warnings only: the dataset is usable, but please review it."
        );
    }
}

/// Text for an I/O-tier failure. Names the tier that failed.
pub fn render_load_failure_text(err: &LoadError) -> String {
    format!("{err}\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    dataset: String,
    exit_code: u8,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

#[derive(Serialize)]
struct JsonLoadFailure {
    dataset: String,
    exit_code: u8,
    outcome: &'static str,
    kind: &'static str,
    message: String,
}

/// Render the report as a pretty-printed JSON document.
pub fn render_json(report: &ValidationReport, dataset: &Path) -> serde_json::Result<String> {
    let doc = JsonReport {
        dataset: dataset.display().to_string(),
        exit_code: report.exit_code(),
        report,
    };
    serde_json::to_string_pretty(&doc)
}

/// Render an I/O-tier failure as a JSON document.
pub fn render_load_failure_json(err: &LoadError, dataset: &Path) -> serde_json::Result<String> {
    let doc = JsonLoadFailure {
        dataset: dataset.display().to_string(),
        exit_code: 1,
        outcome: "load_failed",
        kind: err.kind().as_str(),
        message: err.to_string(),
    };
    serde_json::to_string_pretty(&doc)
}
