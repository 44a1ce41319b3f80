//! Candidate scoring, ordering and confidence assessment.

pub mod ranker;
pub mod similarity;

pub use ranker::{
    CONFIDENT_MARGIN, CONFIDENT_SCORE, MatchAssessment, assess, combine_score,
    rank_candidates, year_bonus,
};
pub use similarity::{normalize_title, title_similarity};
