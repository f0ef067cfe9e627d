//! # Structural Validation
//!
//! Walks a loaded election dataset and records what is missing or has the
//! wrong shape, level by level: top level, parties, districts, candidates.
//!
//! ## Invariants
//!
//! - Validation is read-only. The tree is borrowed, never mutated.
//! - Structural problems never abort the walk. Each one becomes a
//!   [`Diagnostic`](crate::Diagnostic) and the walk continues with the next
//!   check. The only fatal case is a root that is not an object, since no
//!   field lookup is possible.
//! - Checks run in a fixed order (parties in list order, then districts in
//!   map order, candidates in list order), so reports are reproducible.

use serde_json::{Map, Value};
use thiserror::Error;

use plens_core::fields;
use plens_core::PolicyContent;

use crate::diagnostic::{Diagnostics, Location};

/// Fatal validation error.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document root is not a JSON object.
    #[error("dataset root must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type of the root value.
        found: &'static str,
    },
}

/// Validate the structure of a loaded dataset.
///
/// # Errors
///
/// Returns [`SchemaValidationError::NotAnObject`] if `dataset` is not a JSON
/// object. Every other problem is reported in the returned diagnostics.
pub fn validate_dataset(dataset: &Value) -> Result<Diagnostics, SchemaValidationError> {
    let root = dataset
        .as_object()
        .ok_or(SchemaValidationError::NotAnObject {
            found: json_type(dataset),
        })?;

    let mut checker = Checker::default();
    checker.check_root(root);

    tracing::debug!(
        errors = checker.diagnostics.error_count(),
        warnings = checker.diagnostics.warning_count(),
        "structural validation finished"
    );
    Ok(checker.diagnostics)
}

/// JSON type name used in diagnostic messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Falsy in the loose sense the dataset authors use for "empty".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Which value shapes a party mapping field accepts.
#[derive(Debug, Clone, Copy)]
enum EntryShape {
    /// String or list of strings.
    PolicyContent,
    /// Plain string only.
    Text,
}

/// Rules for one mapping-valued party field.
#[derive(Debug, Clone, Copy)]
struct SectionRule {
    field: &'static str,
    shape: EntryShape,
    /// Warn on absence, empty mapping and empty entries.
    expected: bool,
    /// What an entry is called in messages.
    noun: &'static str,
}

const PERSONALIZED_POLICIES: SectionRule = SectionRule {
    field: fields::PERSONALIZED_POLICIES,
    shape: EntryShape::PolicyContent,
    expected: true,
    noun: "policy",
};

const PERSONALIZED_EXPLANATIONS: SectionRule = SectionRule {
    field: fields::PERSONALIZED_EXPLANATIONS,
    shape: EntryShape::PolicyContent,
    expected: false,
    noun: "explanation",
};

const GENERAL_POLICIES: SectionRule = SectionRule {
    field: fields::GENERAL_POLICIES,
    shape: EntryShape::Text,
    expected: true,
    noun: "policy",
};

const GENERAL_EXPLANATIONS: SectionRule = SectionRule {
    field: fields::GENERAL_EXPLANATIONS,
    shape: EntryShape::Text,
    expected: false,
    noun: "explanation",
};

#[derive(Default)]
struct Checker {
    diagnostics: Diagnostics,
}

impl Checker {
    fn check_root(&mut self, root: &Map<String, Value>) {
        let parties = root.get(fields::PARTIES);
        let districts = root.get(fields::DISTRICTS);

        if parties.is_none() {
            self.diagnostics
                .error(Location::Root, "'parties' key is missing");
        }
        if districts.is_none() {
            self.diagnostics
                .error(Location::Root, "'districts' key is missing");
        }

        if let Some(parties) = parties {
            self.check_parties(parties);
        }
        if let Some(districts) = districts {
            self.check_districts(districts);
        }
    }

    fn check_parties(&mut self, parties: &Value) {
        let Some(list) = parties.as_array() else {
            self.diagnostics.error(
                Location::Root,
                format!("'parties' must be a list (found {})", json_type(parties)),
            );
            return;
        };

        if list.is_empty() {
            self.diagnostics.warning(Location::Root, "'parties' is empty");
            return;
        }

        for (index, party) in list.iter().enumerate() {
            self.check_party(index, party);
        }
    }

    fn check_party(&mut self, index: usize, party: &Value) {
        let Some(record) = party.as_object() else {
            self.diagnostics.error(
                Location::Party { index, name: None },
                format!("party entry must be an object (found {})", json_type(party)),
            );
            return;
        };

        let name = record
            .get(fields::NAME)
            .and_then(Value::as_str)
            .map(str::to_owned);

        match record.get(fields::NAME) {
            None => self.diagnostics.error(
                Location::Party {
                    index,
                    name: name.clone(),
                },
                "'name' field is missing",
            ),
            Some(value) if is_blank(value) => self.diagnostics.warning(
                Location::Party {
                    index,
                    name: name.clone(),
                },
                "'name' is empty",
            ),
            Some(_) => {}
        }

        let party = PartyRef {
            index,
            name: name.as_deref(),
            record,
        };
        for rule in [
            PERSONALIZED_POLICIES,
            PERSONALIZED_EXPLANATIONS,
            GENERAL_POLICIES,
            GENERAL_EXPLANATIONS,
        ] {
            self.check_section(&party, rule);
        }
    }

    fn check_section(&mut self, party: &PartyRef<'_>, rule: SectionRule) {
        let Some(section) = party.record.get(rule.field) else {
            if rule.expected {
                self.diagnostics.warning(
                    party.location(rule.field, None),
                    format!("'{}' field is missing", rule.field),
                );
            }
            return;
        };

        let Some(entries) = section.as_object() else {
            self.diagnostics.error(
                party.location(rule.field, None),
                format!(
                    "'{}' must be an object (found {})",
                    rule.field,
                    json_type(section)
                ),
            );
            return;
        };

        if rule.expected && entries.is_empty() {
            self.diagnostics.warning(
                party.location(rule.field, None),
                format!("'{}' is empty", rule.field),
            );
        }

        for (key, value) in entries {
            let location = || party.location(rule.field, Some(key.as_str()));
            match rule.shape {
                EntryShape::PolicyContent => match PolicyContent::from_value(value) {
                    None => self.diagnostics.error(
                        location(),
                        format!(
                            "{} must be a string or a list of strings (found {})",
                            rule.noun,
                            describe_content(value)
                        ),
                    ),
                    Some(content) if rule.expected && content.is_empty() => {
                        let message = match content {
                            PolicyContent::Items(_) => format!("{} list is empty", rule.noun),
                            PolicyContent::Text(_) => format!("{} is an empty string", rule.noun),
                        };
                        self.diagnostics.warning(location(), message);
                    }
                    Some(_) => {}
                },
                EntryShape::Text => match value.as_str() {
                    None => self.diagnostics.error(
                        location(),
                        format!(
                            "{} must be a string (found {})",
                            rule.noun,
                            json_type(value)
                        ),
                    ),
                    Some("") if rule.expected => self
                        .diagnostics
                        .warning(location(), format!("{} is an empty string", rule.noun)),
                    Some(_) => {}
                },
            }
        }
    }

    fn check_districts(&mut self, districts: &Value) {
        let Some(map) = districts.as_object() else {
            self.diagnostics.error(
                Location::Root,
                format!(
                    "'districts' must be an object (found {})",
                    json_type(districts)
                ),
            );
            return;
        };

        if map.is_empty() {
            self.diagnostics
                .warning(Location::Root, "'districts' is empty");
            return;
        }

        for (district, candidates) in map {
            self.check_district(district, candidates);
        }
    }

    fn check_district(&mut self, district: &str, candidates: &Value) {
        let Some(list) = candidates.as_array() else {
            self.diagnostics.error(
                Location::District {
                    district: district.to_owned(),
                },
                format!(
                    "candidates must be a list (found {})",
                    json_type(candidates)
                ),
            );
            return;
        };

        if list.is_empty() {
            self.diagnostics.warning(
                Location::District {
                    district: district.to_owned(),
                },
                "no candidates registered",
            );
        }

        for (index, candidate) in list.iter().enumerate() {
            self.check_candidate(district, index, candidate);
        }
    }

    fn check_candidate(&mut self, district: &str, index: usize, candidate: &Value) {
        let location = || Location::Candidate {
            district: district.to_owned(),
            index,
        };

        let Some(record) = candidate.as_object() else {
            self.diagnostics.error(
                location(),
                format!(
                    "candidate must be an object (found {})",
                    json_type(candidate)
                ),
            );
            return;
        };

        match record.get(fields::NAME) {
            None => self.diagnostics.error(location(), "'name' field is missing"),
            Some(value) if is_blank(value) => {
                self.diagnostics.warning(location(), "'name' is empty")
            }
            Some(_) => {}
        }

        if !record.contains_key(fields::PARTY) {
            self.diagnostics
                .error(location(), "'party' field is missing");
        }

        if let Some(note) = record.get(fields::NOTE) {
            if !note.is_string() {
                self.diagnostics.error(
                    location(),
                    format!("'note' must be a string (found {})", json_type(note)),
                );
            }
        }
    }
}

/// Borrowed party context for section checks.
struct PartyRef<'a> {
    index: usize,
    name: Option<&'a str>,
    record: &'a Map<String, Value>,
}

impl PartyRef<'_> {
    fn location(&self, field: &str, key: Option<&str>) -> Location {
        Location::PartyField {
            index: self.index,
            name: self.name.map(str::to_owned),
            field: field.to_owned(),
            key: key.map(str::to_owned),
        }
    }
}

/// A list with non-string members is described as such, not just "list".
fn describe_content(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "list with non-string items",
        other => json_type(other),
    }
}
