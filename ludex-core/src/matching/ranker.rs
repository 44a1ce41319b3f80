use std::cmp::Ordering;

use ludex_model::{CandidateRecord, CleanedQuery, ScoredCandidate};
use ordered_float::NotNan;
use tracing::debug;

use super::similarity::title_similarity;

/// Minimum top score for an automatic rename.
pub const CONFIDENT_SCORE: f64 = 0.85;
/// Required lead of the winner over the runner-up.
pub const CONFIDENT_MARGIN: f64 = 0.10;

const YEAR_MATCH_BONUS: f64 = 0.15;
const YEAR_MISMATCH_PENALTY: f64 = -0.10;

/// Ranker verdict for one folder's candidate set.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchAssessment {
    /// The catalog returned nothing.
    NoMatch,
    /// A single winner clears the score threshold and the margin.
    Confident(ScoredCandidate),
    /// Ranked candidates (best first) that need a human or scripted choice.
    Ambiguous(Vec<ScoredCandidate>),
}

pub fn year_bonus(hinted: Option<u16>, candidate: Option<u16>) -> f64 {
    match (hinted, candidate) {
        (Some(hinted), Some(candidate)) if hinted == candidate => {
            YEAR_MATCH_BONUS
        }
        (Some(_), Some(_)) => YEAR_MISMATCH_PENALTY,
        _ => 0.0,
    }
}

pub fn combine_score(similarity: f64, bonus: f64) -> f64 {
    (similarity + bonus).clamp(0.0, 1.0)
}

fn not_nan_or_zero(value: f64) -> NotNan<f64> {
    NotNan::new(value)
        .unwrap_or_else(|_| NotNan::new(0.0).expect("0 is not NaN"))
}

/// Score descending, then newer release first (unknown years last), then
/// name and source id ascending. Total, so ranking is deterministic.
fn cmp_ranked(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    not_nan_or_zero(b.score)
        .cmp(&not_nan_or_zero(a.score))
        .then_with(|| b.candidate.release_year.cmp(&a.candidate.release_year))
        .then_with(|| {
            a.candidate
                .canonical_name
                .cmp(&b.candidate.canonical_name)
        })
        .then_with(|| a.candidate.source_id.cmp(&b.candidate.source_id))
}

pub fn rank_candidates(
    cleaned: &CleanedQuery,
    raw: &str,
    candidates: &[CandidateRecord],
) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| {
            let similarity =
                title_similarity(&cleaned.search_title, &candidate.canonical_name);
            let bonus = year_bonus(cleaned.hinted_year, candidate.release_year);
            ScoredCandidate::new(candidate.clone(), combine_score(similarity, bonus))
        })
        .collect();

    ranked.sort_by(cmp_ranked);

    if let Some(top) = ranked.first() {
        debug!(
            folder = raw,
            candidates = ranked.len(),
            top = %top.candidate,
            score = top.score,
            "ranked catalog candidates"
        );
    }
    ranked
}

/// Classify a ranked list (best first, as returned by [`rank_candidates`]).
///
/// Confident requires the top score to reach [`CONFIDENT_SCORE`] and either
/// a lone candidate or a runner-up at least [`CONFIDENT_MARGIN`] behind.
pub fn assess(mut ranked: Vec<ScoredCandidate>) -> MatchAssessment {
    let Some(top) = ranked.first() else {
        return MatchAssessment::NoMatch;
    };

    let clear_lead = match ranked.get(1) {
        None => true,
        Some(second) => second.score <= top.score - CONFIDENT_MARGIN,
    };

    if top.score >= CONFIDENT_SCORE && clear_lead {
        MatchAssessment::Confident(ranked.swap_remove(0))
    } else {
        MatchAssessment::Ambiguous(ranked)
    }
}
