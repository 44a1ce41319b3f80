//! Core data model definitions shared across Ludex crates.
#![allow(missing_docs)]

pub mod candidate;
pub mod decision;
pub mod folder;
pub mod query;

// Intentionally curated re-exports for downstream consumers.
pub use candidate::{CandidateRecord, ScoredCandidate};
pub use decision::{FailureKind, RenameDecision, RenameOutcome};
pub use folder::RawFolderName;
pub use query::CleanedQuery;
