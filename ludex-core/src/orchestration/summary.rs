use std::fmt;

use ludex_model::{RenameDecision, RenameOutcome};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub total: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub unresolved: usize,
}

/// Every folder's terminal decision, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub counts: RunCounts,
    pub decisions: Vec<RenameDecision>,
}

impl RunSummary {
    pub fn new(decisions: Vec<RenameDecision>) -> Self {
        let mut counts = RunCounts {
            total: decisions.len(),
            ..RunCounts::default()
        };
        for decision in &decisions {
            match decision.outcome {
                RenameOutcome::Renamed => counts.renamed += 1,
                RenameOutcome::Skipped => counts.skipped += 1,
                RenameOutcome::Failed => counts.failed += 1,
                RenameOutcome::Unresolved => counts.unresolved += 1,
            }
        }
        Self { counts, decisions }
    }

    /// Failures worth re-running the batch for (catalog outages, rate limits).
    pub fn retryable(&self) -> impl Iterator<Item = &RenameDecision> {
        self.decisions
            .iter()
            .filter(|d| d.failure.is_some_and(|kind| kind.is_retryable()))
    }

    pub fn has_failures(&self) -> bool {
        self.counts.failed > 0
    }
}

fn write_decision(f: &mut fmt::Formatter<'_>, decision: &RenameDecision) -> fmt::Result {
    let raw = &decision.raw_folder_name;
    match (decision.outcome, &decision.new_name) {
        (RenameOutcome::Renamed, Some(new_name)) if decision.dry_run => {
            write!(f, "  would rename  {raw} -> {new_name}")?
        }
        (RenameOutcome::Renamed, Some(new_name)) => {
            write!(f, "  renamed       {raw} -> {new_name}")?
        }
        (outcome, _) => write!(f, "  {:<12}  {raw}", outcome.as_str())?,
    }
    match (decision.failure, &decision.detail) {
        (Some(kind), Some(detail)) => write!(f, " ({kind}: {detail})"),
        (Some(kind), None) => write!(f, " ({kind})"),
        (None, Some(detail)) => write!(f, " ({detail})"),
        (None, None) => Ok(()),
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decision in &self.decisions {
            write_decision(f, decision)?;
            writeln!(f)?;
        }

        let counts = &self.counts;
        writeln!(f, "Found {} folders", counts.total)?;
        writeln!(f, "Renamed: {}", counts.renamed)?;
        writeln!(f, "Skipped: {}", counts.skipped)?;
        writeln!(f, "Failed: {}", counts.failed)?;
        write!(f, "Unresolved: {}", counts.unresolved)?;

        let retryable: Vec<_> = self.retryable().map(|d| d.raw_folder_name.as_str()).collect();
        if !retryable.is_empty() {
            write!(f, "\nRetry later: {}", retryable.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ludex_model::{CandidateRecord, FailureKind};

    use super::*;

    fn sample() -> RunSummary {
        let hades = CandidateRecord::new("Hades", Some(2020), "igdb:5");
        RunSummary::new(vec![
            RenameDecision::renamed("Hades-RUNE".into(), hades, "Hades (2020)".into(), false),
            RenameDecision::skipped("Dead Space (2008)".into(), "already canonical"),
            RenameDecision::failed(
                "Doom.Eternal-CODEX".into(),
                FailureKind::CatalogUnavailable,
                "IGDB search returned 503",
            ),
            RenameDecision::failed(
                "Celeste-PLAZA".into(),
                FailureKind::NameCollision,
                "target already exists",
            ),
            RenameDecision::unresolved("Obscure.Game-RUNE".into(), "no catalog match"),
        ])
    }

    #[test]
    fn counts_every_outcome() {
        let summary = sample();
        assert_eq!(
            summary.counts,
            RunCounts {
                total: 5,
                renamed: 1,
                skipped: 1,
                failed: 2,
                unresolved: 1,
            }
        );
        assert!(summary.has_failures());
    }

    #[test]
    fn only_catalog_failures_are_listed_for_retry() {
        let summary = sample();
        let retryable: Vec<_> = summary
            .retryable()
            .map(|d| d.raw_folder_name.as_str())
            .collect();
        assert_eq!(retryable, vec!["Doom.Eternal-CODEX"]);
    }

    #[test]
    fn rendering_lists_each_folder_and_totals() {
        let text = sample().to_string();
        assert!(text.contains("renamed       Hades-RUNE -> Hades (2020)"));
        assert!(
            text.contains("Doom.Eternal-CODEX (catalog unavailable: IGDB search returned 503)")
        );
        assert!(text.contains("Found 5 folders"));
        assert!(text.contains("Unresolved: 1"));
        assert!(text.ends_with("Retry later: Doom.Eternal-CODEX"));
    }

    #[test]
    fn dry_run_renames_are_marked() {
        let hades = CandidateRecord::new("Hades", Some(2020), "igdb:5");
        let summary = RunSummary::new(vec![RenameDecision::renamed(
            "Hades-RUNE".into(),
            hades,
            "Hades (2020)".into(),
            true,
        )]);
        assert!(summary.to_string().contains("would rename  Hades-RUNE -> Hades (2020)"));
    }
}
