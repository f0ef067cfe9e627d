//! # plens-core: Foundational Types for platform-lens
//!
//! This crate owns everything that touches the election dataset before and
//! after validation: reading the JSON file, the dual-shape policy content
//! type, and the permissive read-side view a display layer renders from.
//! Every other crate in the workspace depends on `plens-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **The tree stays generic.** The loader returns a `serde_json::Value`
//!    with no coercion. Field shapes are checked where they are used, either
//!    by `plens-schema` (diagnostics) or by [`catalog`] (graceful defaults).
//!
//! 2. **Load failures are classified.** [`LoadError::kind`] distinguishes a
//!    missing file, malformed JSON, and any other I/O failure so callers can
//!    react differently without matching on message text.
//!
//! 3. **String-or-list is a type.** [`PolicyContent`] is the only place that
//!    decides whether a value is a single string or a list of strings.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `plens-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - The dataset is never mutated after load.

pub mod cache;
pub mod catalog;
pub mod content;
pub mod error;
pub mod fields;
pub mod loader;

// Re-export primary types for ergonomic imports.
pub use cache::DatasetCache;
pub use catalog::{
    load_or_empty, profession_options, topic_options, CandidateView, Catalog, LoadOutcome,
    PartyView, PolicyItem,
};
pub use content::{normalize_explanation, PolicyContent};
pub use error::{LoadError, LoadErrorKind};
pub use loader::{empty_dataset, load_dataset, parse_dataset, DEFAULT_DATASET_FILE};
