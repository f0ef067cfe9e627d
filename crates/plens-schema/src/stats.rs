//! # Dataset Statistics
//!
//! Summary counts computed independently of the structural checks. The
//! profession and topic sets are key-presence based: a key whose value fails
//! validation is still counted, because it still shows up as a filter option.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use plens_core::{fields, profession_options, topic_options};

/// Counts and key sets describing a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStatistics {
    /// Entries in `parties`.
    pub parties_count: usize,
    /// Union of `personalized_policies` keys across parties.
    pub professions: BTreeSet<String>,
    /// Union of `general_policies` keys across parties.
    pub general_topics: BTreeSet<String>,
    /// Entries in `districts`.
    pub districts_count: usize,
    /// Sum of candidate list lengths across districts.
    pub total_candidates: usize,
    /// Parties with `personalized_explanations` or `general_explanations`.
    pub parties_with_explanations: usize,
}

/// How many parties carry explanation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationCoverage {
    /// No party has explanations.
    None,
    /// Some parties lack explanations.
    Partial {
        /// Parties without any explanation field.
        missing: usize,
    },
    /// Every party has explanations.
    Complete,
}

impl DatasetStatistics {
    /// Collect statistics from a loaded dataset.
    ///
    /// Tolerates any shape: fields that are absent or of the wrong type
    /// contribute nothing.
    pub fn collect(dataset: &Value) -> Self {
        let mut stats = Self {
            professions: profession_options(dataset).into_iter().collect(),
            general_topics: topic_options(dataset).into_iter().collect(),
            ..Self::default()
        };

        if let Some(parties) = dataset.get(fields::PARTIES).and_then(Value::as_array) {
            stats.parties_count = parties.len();
            stats.parties_with_explanations = parties
                .iter()
                .filter_map(Value::as_object)
                .filter(|p| {
                    p.contains_key(fields::PERSONALIZED_EXPLANATIONS)
                        || p.contains_key(fields::GENERAL_EXPLANATIONS)
                })
                .count();
        }

        if let Some(districts) = dataset.get(fields::DISTRICTS).and_then(Value::as_object) {
            stats.districts_count = districts.len();
            stats.total_candidates = districts
                .values()
                .filter_map(Value::as_array)
                .map(Vec::len)
                .sum();
        }

        stats
    }

    /// Explanation completeness across parties.
    pub fn explanation_coverage(&self) -> ExplanationCoverage {
        if self.parties_with_explanations == 0 {
            ExplanationCoverage::None
        } else if self.parties_with_explanations < self.parties_count {
            ExplanationCoverage::Partial {
                missing: self.parties_count - self.parties_with_explanations,
            }
        } else {
            ExplanationCoverage::Complete
        }
    }
}
