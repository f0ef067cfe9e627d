//! # Policy Content
//!
//! Personalized policies and their explanations may be written either as a
//! single string or as a list of strings. [`PolicyContent`] is the tagged
//! union for that dual shape; every consumer matches on it instead of
//! probing the raw JSON value.

use serde_json::Value;

/// Separator used when a list of paragraphs is rendered as one text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Policy or explanation content: one string, or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyContent {
    /// A single block of text.
    Text(String),
    /// Ordered items; item `i` of an explanation explains item `i` of the
    /// matching policy.
    Items(Vec<String>),
}

impl PolicyContent {
    /// Interpret a JSON value as policy content.
    ///
    /// Returns `None` for anything other than a string or an array whose
    /// members are all strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Self::Items),
            _ => None,
        }
    }

    /// True for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Items(items) => items.is_empty(),
        }
    }
}

/// Normalize an explanation value for display.
///
/// A string is trimmed. A list keeps its non-blank string items, trimmed,
/// joined by a blank line. Any other shape yields an empty string, which
/// callers treat as "no explanation".
pub fn normalize_explanation(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR),
        _ => String::new(),
    }
}
