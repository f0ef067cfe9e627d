//! # Validation Report
//!
//! Bundles the diagnostics and statistics of one run and classifies the
//! outcome. Presentation lives in the CLI; this module only decides what the
//! run means.

use serde::Serialize;
use serde_json::Value;

use crate::diagnostic::Diagnostics;
use crate::stats::DatasetStatistics;
use crate::validate::{validate_dataset, SchemaValidationError};

/// Overall result of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No diagnostics at all.
    Clean,
    /// Only warnings. Passing, but worth a look.
    WarningsOnly,
    /// At least one error.
    ErrorsPresent,
}

impl Outcome {
    /// Process exit code: nonzero only when errors are present.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Clean | Self::WarningsOnly => 0,
            Self::ErrorsPresent => 1,
        }
    }

    /// True unless errors are present.
    pub fn is_passing(self) -> bool {
        self != Self::ErrorsPresent
    }
}

/// Diagnostics and statistics for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Overall result.
    pub outcome: Outcome,
    /// Summary counts.
    pub statistics: DatasetStatistics,
    /// Findings in check order.
    pub diagnostics: Diagnostics,
}

impl ValidationReport {
    /// Validate `dataset` and collect its statistics.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::NotAnObject`] if the root is not an
    /// object.
    pub fn generate(dataset: &Value) -> Result<Self, SchemaValidationError> {
        let diagnostics = validate_dataset(dataset)?;
        let statistics = DatasetStatistics::collect(dataset);
        Ok(Self::from_parts(statistics, diagnostics))
    }

    /// Build a report from separately computed parts.
    pub fn from_parts(statistics: DatasetStatistics, diagnostics: Diagnostics) -> Self {
        let outcome = if diagnostics.has_errors() {
            Outcome::ErrorsPresent
        } else if diagnostics.is_empty() {
            Outcome::Clean
        } else {
            Outcome::WarningsOnly
        };

        tracing::info!(
            parties = statistics.parties_count,
            districts = statistics.districts_count,
            candidates = statistics.total_candidates,
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "validation report ready"
        );

        Self {
            outcome,
            statistics,
            diagnostics,
        }
    }

    /// Exit code for automation: 1 if any error exists, otherwise 0.
    pub fn exit_code(&self) -> u8 {
        self.outcome.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Location;
    use serde_json::json;

    #[test]
    fn outcome_classification() {
        let stats = DatasetStatistics::default();

        let clean = ValidationReport::from_parts(stats.clone(), Diagnostics::new());
        assert_eq!(clean.outcome, Outcome::Clean);
        assert_eq!(clean.exit_code(), 0);

        let mut warnings = Diagnostics::new();
        warnings.warning(Location::Root, "'parties' is empty");
        warnings.warning(Location::Root, "'districts' is empty");
        let report = ValidationReport::from_parts(stats.clone(), warnings.clone());
        assert_eq!(report.outcome, Outcome::WarningsOnly);
        assert_eq!(report.exit_code(), 0);
        assert!(report.outcome.is_passing());

        let mut errors = warnings;
        errors.error(Location::Root, "'districts' key is missing");
        let report = ValidationReport::from_parts(stats, errors);
        assert_eq!(report.outcome, Outcome::ErrorsPresent);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn generate_rejects_non_object_root() {
        assert!(ValidationReport::generate(&json!([])).is_err());
    }

    #[test]
    fn serializes_outcome_in_snake_case() {
        let report = ValidationReport::generate(&json!({ "parties": [], "districts": {} })).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcome"], "warnings_only");
        assert_eq!(value["statistics"]["parties_count"], 0);
        assert_eq!(value["diagnostics"].as_array().unwrap().len(), 2);
    }
}
