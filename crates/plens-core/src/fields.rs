//! Field names recognized in the election dataset.
//!
//! Shared by the validator and the catalog so both read the same keys.

/// Top-level sequence of party records.
pub const PARTIES: &str = "parties";
/// Top-level mapping from district name to candidate records.
pub const DISTRICTS: &str = "districts";

/// Party or candidate display name.
pub const NAME: &str = "name";
/// Profession/role label → policy content (string or list of strings).
pub const PERSONALIZED_POLICIES: &str = "personalized_policies";
/// Profession/role label → explanation content (string or list of strings).
pub const PERSONALIZED_EXPLANATIONS: &str = "personalized_explanations";
/// Topic label → policy string.
pub const GENERAL_POLICIES: &str = "general_policies";
/// Topic label → explanation string.
pub const GENERAL_EXPLANATIONS: &str = "general_explanations";

/// Candidate party affiliation (free text).
pub const PARTY: &str = "party";
/// Optional candidate note.
pub const NOTE: &str = "note";
