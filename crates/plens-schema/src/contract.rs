//! # Dataset Schema Contract
//!
//! A JSON Schema (Draft 2020-12) rendition of the dataset's type rules,
//! embedded from `schemas/election-data.schema.json`. It lets tools outside
//! this workspace check a dataset, and it is held to the structural
//! validator: a dataset with zero error-severity diagnostics must conform.
//!
//! Warning-level rules (empty names, missing optional sections) have no
//! counterpart here.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// Schema document, as shipped.
pub const DATASET_SCHEMA: &str = include_str!("../schemas/election-data.schema.json");

/// Name used for the embedded schema in error messages.
pub const DATASET_SCHEMA_NAME: &str = "election-data.schema.json";

/// Error from the schema contract.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: &'static str,
        /// Structured list of individual violations.
        violations: ContractViolations,
    },

    /// The embedded schema is not valid JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename.
        schema_name: &'static str,
        /// Reason the schema could not be parsed.
        reason: String,
    },

    /// The compiled validator could not be built.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename.
        schema_name: &'static str,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single schema violation.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the dataset.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of schema violations.
#[derive(Debug, Clone)]
pub struct ContractViolations {
    violations: Vec<Violation>,
}

impl ContractViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ContractViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled dataset schema.
pub struct DatasetSchema {
    validator: Validator,
}

impl fmt::Debug for DatasetSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetSchema")
            .field("schema", &DATASET_SCHEMA_NAME)
            .finish_non_exhaustive()
    }
}

impl DatasetSchema {
    /// Parse and compile the embedded schema.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::SchemaLoadError`] or
    /// [`ContractError::ValidatorBuildError`] if the embedded schema is
    /// broken.
    pub fn new() -> Result<Self, ContractError> {
        let schema = schema_value()?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| ContractError::ValidatorBuildError {
                schema_name: DATASET_SCHEMA_NAME,
                reason: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Check `dataset` against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ValidationFailed`] with every violation if
    /// the dataset does not conform.
    pub fn check(&self, dataset: &Value) -> Result<(), ContractError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(dataset)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ContractError::ValidationFailed {
                schema_name: DATASET_SCHEMA_NAME,
                violations: ContractViolations { violations },
            })
        }
    }
}

/// The embedded schema as a JSON value.
///
/// # Errors
///
/// Returns [`ContractError::SchemaLoadError`] if the embedded document is
/// not valid JSON.
pub fn schema_value() -> Result<Value, ContractError> {
    serde_json::from_str(DATASET_SCHEMA).map_err(|e| ContractError::SchemaLoadError {
        schema_name: DATASET_SCHEMA_NAME,
        reason: format!("invalid JSON: {e}"),
    })
}
