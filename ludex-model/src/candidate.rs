use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One catalog entry as returned by a catalog provider.
///
/// Records sharing a canonical name but not a release year (an original
/// and its remake) are distinct entities and are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateRecord {
    pub canonical_name: String,
    pub release_year: Option<u16>,
    pub source_id: String,
    /// Set when the catalog marks the entry as a version of another game
    /// (remake, remaster).
    #[cfg_attr(feature = "serde", serde(default))]
    pub remake: bool,
}

impl CandidateRecord {
    pub fn new(
        canonical_name: impl Into<String>,
        release_year: Option<u16>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            release_year,
            source_id: source_id.into(),
            remake: false,
        }
    }

    pub fn with_remake(mut self, remake: bool) -> Self {
        self.remake = remake;
        self
    }
}

impl fmt::Display for CandidateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.release_year {
            Some(year) => write!(f, "{} ({year})", self.canonical_name),
            None => write!(f, "{} (TBA)", self.canonical_name),
        }?;
        if self.remake {
            f.write_str(" (Remake/Remaster)")?;
        }
        Ok(())
    }
}

/// A candidate paired with its ranking score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredCandidate {
    pub candidate: CandidateRecord,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(candidate: CandidateRecord, score: f64) -> Self {
        Self { candidate, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_marks_unknown_year_and_remakes() {
        let original = CandidateRecord::new("Dead Space", Some(2008), "igdb:1");
        let remake = CandidateRecord::new("Dead Space", Some(2023), "igdb:2")
            .with_remake(true);
        let unreleased = CandidateRecord::new("Hollow Knight: Silksong", None, "igdb:3");

        assert_eq!(original.to_string(), "Dead Space (2008)");
        assert_eq!(remake.to_string(), "Dead Space (2023) (Remake/Remaster)");
        assert_eq!(unreleased.to_string(), "Hollow Knight: Silksong (TBA)");
    }
}
