//! # Catalog: Read-Side View of the Dataset
//!
//! What a display layer needs from a loaded dataset: the selectable filter
//! options, each party's policies for the selected professions and topics
//! paired with their explanations, and the candidates of a district.
//!
//! The catalog is maximally permissive. A party missing an optional field
//! simply has nothing to show for it, and values of the wrong shape are
//! skipped. Only an I/O-tier failure of the whole file is surfaced, and even
//! then [`load_or_empty`] degrades to an empty dataset instead of failing.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::content::{normalize_explanation, PolicyContent};
use crate::error::LoadError;
use crate::fields;
use crate::loader::{empty_dataset, load_dataset};

/// Shown when a party record has no usable name.
pub const UNKNOWN_PARTY: &str = "Unknown party";
/// Shown when a candidate record has no usable name.
pub const UNKNOWN_CANDIDATE: &str = "Unknown";
/// Shown when a candidate record has no usable affiliation.
pub const INDEPENDENT: &str = "Independent";

/// Result of a display-layer load: always a dataset, plus the failure that
/// forced the empty fallback, if any.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The loaded dataset, or the empty dataset on failure.
    pub dataset: Value,
    /// Why the empty dataset was used.
    pub failure: Option<LoadError>,
}

/// Load the dataset, degrading to `{"parties": [], "districts": {}}` on any
/// I/O-tier failure.
pub fn load_or_empty(path: impl AsRef<Path>) -> LoadOutcome {
    let path = path.as_ref();
    match load_dataset(path) {
        Ok(dataset) => LoadOutcome {
            dataset,
            failure: None,
        },
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                kind = err.kind().as_str(),
                "dataset unavailable, falling back to empty dataset"
            );
            LoadOutcome {
                dataset: empty_dataset(),
                failure: Some(err),
            }
        }
    }
}

/// Sorted union of the profession keys of every party's
/// `personalized_policies`.
pub fn profession_options(dataset: &Value) -> Vec<String> {
    key_union(dataset, fields::PERSONALIZED_POLICIES)
}

/// Sorted union of the topic keys of every party's `general_policies`.
pub fn topic_options(dataset: &Value) -> Vec<String> {
    key_union(dataset, fields::GENERAL_POLICIES)
}

fn key_union(dataset: &Value, field: &str) -> Vec<String> {
    let mut keys = BTreeSet::new();
    if let Some(parties) = dataset.get(fields::PARTIES).and_then(Value::as_array) {
        for party in parties {
            if let Some(map) = party.get(field).and_then(Value::as_object) {
                keys.extend(map.keys().cloned());
            }
        }
    }
    keys.into_iter().collect()
}

/// One policy line, with its explanation when the dataset has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyItem {
    /// Policy text.
    pub text: String,
    /// Normalized explanation; `None` when absent or blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Borrowed view over a loaded dataset.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    dataset: &'a Value,
}

impl<'a> Catalog<'a> {
    /// Wrap a loaded dataset. Any JSON value is accepted.
    pub fn new(dataset: &'a Value) -> Self {
        Self { dataset }
    }

    /// Party records in display order. Entries that are not mappings are
    /// skipped; [`PartyView::index`] keeps the original position.
    pub fn parties(&self) -> impl Iterator<Item = PartyView<'a>> + 'a {
        self.dataset
            .get(fields::PARTIES)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .enumerate()
            .filter_map(|(index, party)| {
                party
                    .as_object()
                    .map(|record| PartyView { index, record })
            })
    }

    /// Profession filter options, sorted.
    pub fn profession_options(&self) -> Vec<String> {
        profession_options(self.dataset)
    }

    /// Topic filter options, sorted.
    pub fn topic_options(&self) -> Vec<String> {
        topic_options(self.dataset)
    }

    /// District names, sorted.
    pub fn district_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&str> = self
            .districts()
            .map(|d| d.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Candidates of `district`, or `None` if there is no such district.
    ///
    /// A district whose value is not a list has no candidates. Candidate
    /// entries that are not mappings are skipped.
    pub fn candidates(&self, district: &str) -> Option<Vec<CandidateView>> {
        let entries = self.districts()?.get(district)?;
        Some(
            entries
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(Value::as_object)
                .map(CandidateView::from_record)
                .collect(),
        )
    }

    fn districts(&self) -> Option<&'a Map<String, Value>> {
        self.dataset.get(fields::DISTRICTS).and_then(Value::as_object)
    }
}

/// Borrowed view over one party record.
#[derive(Debug, Clone, Copy)]
pub struct PartyView<'a> {
    index: usize,
    record: &'a Map<String, Value>,
}

impl<'a> PartyView<'a> {
    /// Position of the party in the `parties` list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The party name, or [`UNKNOWN_PARTY`] when absent or not a string.
    pub fn name(&self) -> &'a str {
        self.record
            .get(fields::NAME)
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_PARTY)
    }

    /// True if either explanation field is present.
    pub fn has_explanations(&self) -> bool {
        self.record.contains_key(fields::PERSONALIZED_EXPLANATIONS)
            || self.record.contains_key(fields::GENERAL_EXPLANATIONS)
    }

    /// Policies this party offers `profession`, each paired with its
    /// explanation.
    ///
    /// With a list of policies, a list explanation is matched by position;
    /// items past the end of a shorter explanation list have none. A string
    /// explanation applies to every item. Returns `None` when the party has
    /// no usable entry for `profession`.
    pub fn profession_policies(
        &self,
        profession: &str,
        with_explanations: bool,
    ) -> Option<Vec<PolicyItem>> {
        let value = self.section(fields::PERSONALIZED_POLICIES)?.get(profession)?;
        let content = PolicyContent::from_value(value)?;

        let explanation = if with_explanations {
            self.section(fields::PERSONALIZED_EXPLANATIONS)
                .and_then(|m| m.get(profession))
        } else {
            None
        };

        let items = match content {
            PolicyContent::Text(text) => vec![PolicyItem {
                text,
                explanation: explanation.and_then(non_blank),
            }],
            PolicyContent::Items(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, text)| {
                    let explanation = match explanation {
                        Some(Value::Array(list)) => list.get(i).and_then(non_blank),
                        Some(other) => non_blank(other),
                        None => None,
                    };
                    PolicyItem { text, explanation }
                })
                .collect(),
        };
        Some(items)
    }

    /// This party's policy on `topic`, with its explanation. Returns `None`
    /// when the topic is absent or its value is not a string.
    pub fn topic_policy(&self, topic: &str, with_explanations: bool) -> Option<PolicyItem> {
        let text = self.section(fields::GENERAL_POLICIES)?.get(topic)?.as_str()?;
        let explanation = if with_explanations {
            self.section(fields::GENERAL_EXPLANATIONS)
                .and_then(|m| m.get(topic))
                .and_then(non_blank)
        } else {
            None
        };
        Some(PolicyItem {
            text: text.to_owned(),
            explanation,
        })
    }

    fn section(&self, field: &str) -> Option<&'a Map<String, Value>> {
        self.record.get(field).and_then(Value::as_object)
    }
}

fn non_blank(value: &Value) -> Option<String> {
    Some(normalize_explanation(value)).filter(|s| !s.is_empty())
}

/// One candidate with display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    /// Candidate name, or [`UNKNOWN_CANDIDATE`].
    pub name: String,
    /// Affiliation, or [`INDEPENDENT`].
    pub party: String,
    /// Note, omitted when absent or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CandidateView {
    fn from_record(record: &Map<String, Value>) -> Self {
        let text = |field: &str| record.get(field).and_then(Value::as_str);
        Self {
            name: text(fields::NAME).unwrap_or(UNKNOWN_CANDIDATE).to_owned(),
            party: text(fields::PARTY).unwrap_or(INDEPENDENT).to_owned(),
            note: text(fields::NOTE)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "parties": [
                {
                    "name": "Green",
                    "personalized_policies": {
                        "nurse": ["more staff", "better pay", "night shift cap"],
                        "farmer": "subsidies"
                    },
                    "personalized_explanations": {
                        "nurse": ["  hire 10k nurses ", ["raise", "", "index to inflation"]],
                        "farmer": ["for", "small farms"]
                    },
                    "general_policies": { "tax": "cut", "energy": "solar" },
                    "general_explanations": { "tax": "for low incomes" }
                },
                "not a party",
                {
                    "personalized_policies": { "teacher": "smaller classes", "nurse": 7 },
                    "general_policies": { "defense": "hold" }
                }
            ],
            "districts": {
                "Tokyo 1": [
                    { "name": "Sato", "party": "Green", "note": "incumbent" },
                    { "name": "Suzuki", "note": "" },
                    42
                ],
                "Osaka 2": "nobody",
                "Aomori 1": []
            }
        })
    }

    #[test]
    fn options_are_sorted_unions() {
        let data = sample();
        assert_eq!(profession_options(&data), vec!["farmer", "nurse", "teacher"]);
        assert_eq!(topic_options(&data), vec!["defense", "energy", "tax"]);
    }

    #[test]
    fn options_of_shapeless_dataset_are_empty() {
        assert!(profession_options(&json!([1, 2])).is_empty());
        assert!(topic_options(&json!({"parties": "x"})).is_empty());
    }

    #[test]
    fn parties_skip_non_records_and_keep_index() {
        let data = sample();
        let catalog = Catalog::new(&data);
        let parties: Vec<_> = catalog.parties().collect();
        assert_eq!(parties.len(), 2);
        assert_eq!(parties[0].name(), "Green");
        assert_eq!(parties[1].index(), 2);
        assert_eq!(parties[1].name(), UNKNOWN_PARTY);
        assert!(parties[0].has_explanations());
        assert!(!parties[1].has_explanations());
    }

    #[test]
    fn list_policies_pair_explanations_by_position() {
        let data = sample();
        let catalog = Catalog::new(&data);
        let green = catalog.parties().next().unwrap();

        let items = green.profession_policies("nurse", true).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].explanation.as_deref(), Some("hire 10k nurses"));
        assert_eq!(
            items[1].explanation.as_deref(),
            Some("raise\n\nindex to inflation")
        );
        // Shorter explanation list: no explanation, not an error.
        assert_eq!(items[2].text, "night shift cap");
        assert_eq!(items[2].explanation, None);
    }

    #[test]
    fn string_policy_takes_joined_list_explanation() {
        let data = sample();
        let catalog = Catalog::new(&data);
        let green = catalog.parties().next().unwrap();

        let items = green.profession_policies("farmer", true).unwrap();
        assert_eq!(
            items,
            vec![PolicyItem {
                text: "subsidies".into(),
                explanation: Some("for\n\nsmall farms".into()),
            }]
        );
    }

    #[test]
    fn explanations_can_be_disabled() {
        let data = sample();
        let catalog = Catalog::new(&data);
        let green = catalog.parties().next().unwrap();

        let items = green.profession_policies("nurse", false).unwrap();
        assert!(items.iter().all(|i| i.explanation.is_none()));
        assert_eq!(green.topic_policy("tax", false).unwrap().explanation, None);
    }

    #[test]
    fn missing_or_invalid_entries_are_absent() {
        let data = sample();
        let catalog = Catalog::new(&data);
        let parties: Vec<_> = catalog.parties().collect();

        assert!(parties[0].profession_policies("teacher", true).is_none());
        assert!(parties[1].profession_policies("nurse", true).is_none());
        assert!(parties[1].topic_policy("tax", true).is_none());
    }

    #[test]
    fn topic_policy_with_explanation() {
        let data = sample();
        let catalog = Catalog::new(&data);
        let green = catalog.parties().next().unwrap();

        let tax = green.topic_policy("tax", true).unwrap();
        assert_eq!(tax.text, "cut");
        assert_eq!(tax.explanation.as_deref(), Some("for low incomes"));
        assert_eq!(green.topic_policy("energy", true).unwrap().explanation, None);
    }

    #[test]
    fn districts_and_candidates() {
        let data = sample();
        let catalog = Catalog::new(&data);

        assert_eq!(catalog.district_names(), vec!["Aomori 1", "Osaka 2", "Tokyo 1"]);

        let tokyo = catalog.candidates("Tokyo 1").unwrap();
        assert_eq!(tokyo.len(), 2);
        assert_eq!(tokyo[0].note.as_deref(), Some("incumbent"));
        assert_eq!(tokyo[1].party, INDEPENDENT);
        assert_eq!(tokyo[1].note, None);

        assert!(catalog.candidates("Osaka 2").unwrap().is_empty());
        assert!(catalog.candidates("Aomori 1").unwrap().is_empty());
        assert!(catalog.candidates("Nowhere").is_none());
    }

    #[test]
    fn load_or_empty_degrades_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = load_or_empty(dir.path().join("election_data.json"));
        assert_eq!(outcome.dataset, empty_dataset());
        assert_eq!(
            outcome.failure.map(|e| e.kind()),
            Some(LoadErrorKind::FileNotFound)
        );
    }

    #[test]
    fn load_or_empty_degrades_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("election_data.json");
        std::fs::write(&path, "{\"parties\": [").unwrap();

        let outcome = load_or_empty(&path);
        assert_eq!(outcome.dataset, empty_dataset());
        assert_eq!(
            outcome.failure.map(|e| e.kind()),
            Some(LoadErrorKind::MalformedJson)
        );
    }
}
