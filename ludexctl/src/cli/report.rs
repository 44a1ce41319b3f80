use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use ludex_core::RunSummary;
use tracing::info;

use crate::validation::ConfigWarnings;

pub fn print_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        eprintln!("warning: {}", warning.message);
        if let Some(hint) = &warning.hint {
            eprintln!("  hint: {hint}");
        }
    }
}

pub fn print_summary(summary: &RunSummary, elapsed: Duration) {
    println!("{summary}");
    // Whole seconds keep the line readable.
    let elapsed = Duration::from_secs(elapsed.as_secs());
    println!("Finished in {}", humantime::format_duration(elapsed));
}

/// Write the run log as pretty JSON.
pub fn write_report(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .context("failed to serialize run summary")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!(path = %path.display(), decisions = summary.decisions.len(), "wrote run report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludex_model::{CandidateRecord, RenameDecision};

    #[test]
    fn report_is_json_with_counts_and_decisions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        let summary = RunSummary::new(vec![
            RenameDecision::renamed(
                "Hades-RUNE".into(),
                CandidateRecord::new("Hades", Some(2020), "igdb:5"),
                "Hades (2020)".into(),
                false,
            ),
            RenameDecision::unresolved("Obscure.Game-RUNE".into(), "no catalog match"),
        ]);

        write_report(&path, &summary).expect("write report");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read report"))
                .expect("valid json");
        assert_eq!(value["counts"]["total"], 2);
        assert_eq!(value["decisions"][0]["outcome"], "renamed");
        assert_eq!(value["decisions"][0]["new_name"], "Hades (2020)");
        assert_eq!(value["decisions"][1]["raw_folder_name"], "Obscure.Game-RUNE");
    }
}
