//! # plens-schema: Dataset Validation
//!
//! Checks a loaded election dataset before any display layer consumes it.
//!
//! ## Structural Validation (`validate`)
//!
//! [`validate_dataset`] walks the tree once, in a fixed order, and records
//! every finding as an error or a warning. Structural problems never abort
//! the run; only a root that is not an object is fatal.
//!
//! ## Statistics (`stats`)
//!
//! [`DatasetStatistics::collect`] is a separate read-only pass: party,
//! district and candidate counts, the profession and topic key unions, and
//! explanation coverage.
//!
//! ## Report (`report`)
//!
//! [`ValidationReport`] combines both and classifies the run as clean,
//! warnings-only or errors-present. Only errors make the exit code nonzero.
//!
//! ## Schema Contract (`contract`)
//!
//! [`DatasetSchema`] checks a dataset against the embedded JSON Schema of
//! its type rules using the `jsonschema` crate.
//!
//! ## Crate Policy
//!
//! - Depends only on `plens-core` internally.
//! - Validation never mutates the dataset.
//! - Messages name the party, district or candidate they are about.

pub mod contract;
pub mod diagnostic;
pub mod report;
pub mod stats;
pub mod validate;

pub use contract::{ContractError, ContractViolations, DatasetSchema, Violation};
pub use diagnostic::{Diagnostic, Diagnostics, Location, Severity};
pub use report::{Outcome, ValidationReport};
pub use stats::{DatasetStatistics, ExplanationCoverage};
pub use validate::{validate_dataset, SchemaValidationError};
