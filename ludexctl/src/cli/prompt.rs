use async_trait::async_trait;
use dialoguer::{Select, console::Term};
use ludex_core::resolution::{Resolution, Resolver, candidate_label};
use ludex_model::{RawFolderName, ScoredCandidate};
use tracing::warn;

pub const SKIP_LABEL: &str = "Skip this folder";
pub const ABORT_LABEL: &str = "Abort run";

/// Asks the user to pick between ambiguous candidates on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct InteractiveResolver;

impl InteractiveResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for InteractiveResolver {
    fn is_interactive(&self) -> bool {
        true
    }

    async fn resolve(
        &self,
        folder: &RawFolderName,
        ranked: &[ScoredCandidate],
    ) -> Resolution {
        let folder = folder.clone();
        let ranked = ranked.to_vec();
        // dialoguer blocks on the terminal.
        let answer = tokio::task::spawn_blocking(move || prompt(&folder, &ranked)).await;
        match answer {
            Ok(Ok(resolution)) => resolution,
            Ok(Err(err)) => {
                warn!(error = %err, "prompt failed; skipping folder");
                Resolution::Skip
            }
            Err(err) => {
                warn!(error = %err, "prompt task failed; skipping folder");
                Resolution::Skip
            }
        }
    }
}

fn prompt(
    folder: &RawFolderName,
    ranked: &[ScoredCandidate],
) -> dialoguer::Result<Resolution> {
    let choice = Select::new()
        .with_prompt(format!("Multiple matches for '{folder}'"))
        .items(&menu_labels(ranked))
        .default(0)
        .interact_on_opt(&Term::stderr())?;
    Ok(resolution_for(choice, ranked))
}

/// Numbered candidates followed by the skip and abort entries.
pub fn menu_labels(ranked: &[ScoredCandidate]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, scored)| format!("{}. {}", index + 1, candidate_label(scored)))
        .chain([SKIP_LABEL.to_string(), ABORT_LABEL.to_string()])
        .collect()
}

/// Map a menu index back to an answer. Escape counts as skip.
pub fn resolution_for(choice: Option<usize>, ranked: &[ScoredCandidate]) -> Resolution {
    match choice {
        Some(index) if index < ranked.len() => {
            Resolution::Chosen(ranked[index].candidate.clone())
        }
        Some(index) if index > ranked.len() => Resolution::Abort,
        Some(_) | None => Resolution::Skip,
    }
}
