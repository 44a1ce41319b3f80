//! Disambiguation for candidate sets the ranker could not settle.
//!
//! The orchestrator hands an ambiguous, ranked candidate list to a
//! [`Resolver`]. Resolvers choose one of the presented candidates, skip
//! the folder, or abort the whole run. They never pick on their own
//! initiative; anything that is not an explicit choice is a skip.

mod scripted;

use async_trait::async_trait;
use ludex_model::{CandidateRecord, RawFolderName, ScoredCandidate};

pub use scripted::{AutoSkipResolver, ScriptedChoice, ScriptedResolver};

/// Candidates shown per ambiguous folder.
pub const MAX_PRESENTED: usize = 5;

/// A resolver's answer for one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Chosen(CandidateRecord),
    Skip,
    /// Stop the run at the next folder boundary.
    Abort,
}

impl Resolution {
    pub fn into_candidate(self) -> Option<CandidateRecord> {
        match self {
            Resolution::Chosen(candidate) => Some(candidate),
            Resolution::Skip | Resolution::Abort => None,
        }
    }
}

#[async_trait]
pub trait Resolver: Send + Sync {
    /// Interactive resolvers force sequential processing.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Decide an ambiguous folder. `ranked` is never empty and is already
    /// truncated to [`MAX_PRESENTED`], best first.
    async fn resolve(
        &self,
        folder: &RawFolderName,
        ranked: &[ScoredCandidate],
    ) -> Resolution;
}

/// The slice of a ranked list that is shown to a resolver.
pub fn presentable(ranked: &[ScoredCandidate]) -> &[ScoredCandidate] {
    &ranked[..ranked.len().min(MAX_PRESENTED)]
}

/// One menu line: `Dead Space (2023) (Remake/Remaster)  [score 0.93]`.
pub fn candidate_label(scored: &ScoredCandidate) -> String {
    format!("{}  [score {:.2}]", scored.candidate, scored.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(name: &str, year: Option<u16>, score: f64) -> ScoredCandidate {
        ScoredCandidate::new(CandidateRecord::new(name, year, name), score)
    }

    #[test]
    fn presents_at_most_five_in_rank_order() {
        let ranked: Vec<_> = (0..8)
            .map(|i| scored(&format!("Game {i}"), Some(2000 + i), 1.0 - f64::from(i) / 10.0))
            .collect();

        let shown = presentable(&ranked);
        assert_eq!(shown.len(), MAX_PRESENTED);
        assert_eq!(shown[0].candidate.canonical_name, "Game 0");
        assert_eq!(shown[4].candidate.canonical_name, "Game 4");

        assert_eq!(presentable(&ranked[..2]).len(), 2);
    }

    #[test]
    fn labels_carry_name_year_and_score() {
        let remake = ScoredCandidate::new(
            CandidateRecord::new("Dead Space", Some(2023), "igdb:2").with_remake(true),
            0.926,
        );
        assert_eq!(
            candidate_label(&remake),
            "Dead Space (2023) (Remake/Remaster)  [score 0.93]"
        );
        assert_eq!(
            candidate_label(&scored("Silksong", None, 0.5)),
            "Silksong (TBA)  [score 0.50]"
        );
    }

    #[test]
    fn only_a_choice_yields_a_candidate() {
        let record = CandidateRecord::new("Hades", Some(2020), "igdb:5");
        assert_eq!(
            Resolution::Chosen(record.clone()).into_candidate(),
            Some(record)
        );
        assert_eq!(Resolution::Skip.into_candidate(), None);
        assert_eq!(Resolution::Abort.into_candidate(), None);
    }
}
