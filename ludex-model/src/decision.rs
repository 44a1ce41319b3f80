use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::candidate::CandidateRecord;
use crate::folder::RawFolderName;

/// Terminal state of one folder's trip through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RenameOutcome {
    Renamed,
    Skipped,
    Failed,
    Unresolved,
}

impl RenameOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenameOutcome::Renamed => "renamed",
            RenameOutcome::Skipped => "skipped",
            RenameOutcome::Failed => "failed",
            RenameOutcome::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error kind attached to a `Failed` decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    CatalogUnavailable,
    RateLimited,
    InvalidCandidateName,
    PermissionDenied,
    NameCollision,
    PathTooLong,
    NotFound,
    /// Filesystem errors outside the named kinds.
    Io,
}

impl FailureKind {
    /// Kinds that may succeed if the whole batch is re-run later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FailureKind::CatalogUnavailable | FailureKind::RateLimited
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::CatalogUnavailable => "catalog unavailable",
            FailureKind::RateLimited => "rate limited",
            FailureKind::InvalidCandidateName => "invalid candidate name",
            FailureKind::PermissionDenied => "permission denied",
            FailureKind::NameCollision => "name collision",
            FailureKind::PathTooLong => "path too long",
            FailureKind::NotFound => "not found",
            FailureKind::Io => "io error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of how one folder was processed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenameDecision {
    pub raw_folder_name: RawFolderName,
    pub chosen_candidate: Option<CandidateRecord>,
    pub outcome: RenameOutcome,
    /// Final folder name when a rename was applied (or planned, in a dry run).
    pub new_name: Option<String>,
    pub failure: Option<FailureKind>,
    /// Human readable reason or error message.
    pub detail: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dry_run: bool,
}

impl RenameDecision {
    pub fn renamed(
        raw: RawFolderName,
        candidate: CandidateRecord,
        new_name: String,
        dry_run: bool,
    ) -> Self {
        Self {
            raw_folder_name: raw,
            chosen_candidate: Some(candidate),
            outcome: RenameOutcome::Renamed,
            new_name: Some(new_name),
            failure: None,
            detail: None,
            dry_run,
        }
    }

    pub fn skipped(raw: RawFolderName, reason: impl Into<String>) -> Self {
        Self {
            raw_folder_name: raw,
            chosen_candidate: None,
            outcome: RenameOutcome::Skipped,
            new_name: None,
            failure: None,
            detail: Some(reason.into()),
            dry_run: false,
        }
    }

    pub fn unresolved(raw: RawFolderName, reason: impl Into<String>) -> Self {
        Self {
            outcome: RenameOutcome::Unresolved,
            ..Self::skipped(raw, reason)
        }
    }

    pub fn failed(
        raw: RawFolderName,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            raw_folder_name: raw,
            chosen_candidate: None,
            outcome: RenameOutcome::Failed,
            new_name: None,
            failure: Some(kind),
            detail: Some(message.into()),
            dry_run: false,
        }
    }

    /// Attach the candidate that was selected before the folder ended up
    /// skipped or failed.
    pub fn with_candidate(mut self, candidate: CandidateRecord) -> Self {
        self.chosen_candidate = Some(candidate);
        self
    }
}
