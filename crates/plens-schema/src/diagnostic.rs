//! # Diagnostics
//!
//! A diagnostic is one structural finding about the dataset: its severity,
//! where in the dataset it was found, and a human-readable message.
//! [`Diagnostics`] keeps them in the order the checks ran, without
//! deduplication, so two runs over the same tree produce identical reports.

use std::fmt;

use serde::Serialize;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The dataset violates a structural requirement. Fails the exit signal.
    Error,
    /// Worth a look, but consumers handle it.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Where in the dataset a diagnostic applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Location {
    /// The top-level document.
    Root,
    /// A party record.
    Party {
        /// Position in `parties`.
        index: usize,
        /// The party's `name`, when it is a string.
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// A field of a party record, optionally narrowed to one entry.
    PartyField {
        /// Position in `parties`.
        index: usize,
        /// The party's `name`, when it is a string.
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Field name, e.g. `personalized_policies`.
        field: String,
        /// Profession or topic key inside the field.
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
    /// A district entry.
    District {
        /// District name.
        district: String,
    },
    /// A candidate within a district.
    Candidate {
        /// District name.
        district: String,
        /// Position in the district's candidate list.
        index: usize,
    },
}

fn party_label(f: &mut fmt::Formatter<'_>, index: usize, name: Option<&str>) -> fmt::Result {
    match name {
        Some(name) if !name.is_empty() => f.write_str(name),
        _ => write!(f, "party[{index}]"),
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("(root)"),
            Self::Party { index, name } => party_label(f, *index, name.as_deref()),
            Self::PartyField {
                index,
                name,
                field,
                key,
            } => {
                party_label(f, *index, name.as_deref())?;
                match key {
                    Some(key) => write!(f, " - {field}[{key}]"),
                    None => write!(f, " - {field}"),
                }
            }
            Self::District { district } => f.write_str(district),
            Self::Candidate { district, index } => write!(f, "{district} - candidate[{index}]"),
        }
    }
}

/// A single structural finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Where it was found.
    pub location: Location,
    /// What is wrong.
    pub message: String,
}

impl Diagnostic {
    /// True for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error.
    pub fn error(&mut self, location: Location, message: impl Into<String>) {
        self.push(Severity::Error, location, message.into());
    }

    /// Record a warning.
    pub fn warning(&mut self, location: Location, message: impl Into<String>) {
        self.push(Severity::Warning, location, message.into());
    }

    fn push(&mut self, severity: Severity, location: Location, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            location,
            message,
        });
    }

    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All diagnostics in check order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Error-severity diagnostics in check order.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Warning-severity diagnostics in check order.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Number of errors.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// True if at least one error was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  [{}] {d}", d.severity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(Location::Root.to_string(), "(root)");
        assert_eq!(
            Location::Party {
                index: 3,
                name: None
            }
            .to_string(),
            "party[3]"
        );
        assert_eq!(
            Location::Party {
                index: 0,
                name: Some(String::new())
            }
            .to_string(),
            "party[0]"
        );
        assert_eq!(
            Location::PartyField {
                index: 0,
                name: Some("Green".into()),
                field: "personalized_policies".into(),
                key: Some("nurse".into()),
            }
            .to_string(),
            "Green - personalized_policies[nurse]"
        );
        assert_eq!(
            Location::Candidate {
                district: "Tokyo 1".into(),
                index: 2
            }
            .to_string(),
            "Tokyo 1 - candidate[2]"
        );
    }

    #[test]
    fn counts_by_severity_keep_order() {
        let mut d = Diagnostics::new();
        d.warning(Location::Root, "'parties' is empty");
        d.error(
            Location::District {
                district: "D1".into(),
            },
            "candidate list must be a list",
        );
        d.warning(Location::Root, "'districts' is empty");

        assert_eq!(d.len(), 3);
        assert_eq!(d.error_count(), 1);
        assert_eq!(d.warning_count(), 2);
        assert!(d.has_errors());

        let warnings: Vec<_> = d.warnings().map(|w| w.message.as_str()).collect();
        assert_eq!(warnings, vec!["'parties' is empty", "'districts' is empty"]);
    }

    #[test]
    fn serializes_with_scope_tag() {
        let mut d = Diagnostics::new();
        d.error(
            Location::Candidate {
                district: "D1".into(),
                index: 0,
            },
            "'party' field is missing",
        );
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value[0]["severity"], "error");
        assert_eq!(value[0]["location"]["scope"], "candidate");
        assert_eq!(value[0]["location"]["district"], "D1");
    }

    #[test]
    fn display_lists_each_diagnostic() {
        let mut d = Diagnostics::new();
        d.warning(Location::Root, "'parties' is empty");
        assert_eq!(d.to_string(), "  [warning] (root): 'parties' is empty");
    }
}
