use std::collections::HashMap;

use async_trait::async_trait;
use ludex_model::{RawFolderName, ScoredCandidate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Resolution, Resolver};

/// Skips every ambiguous folder. Safe to run with a worker pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoSkipResolver;

#[async_trait]
impl Resolver for AutoSkipResolver {
    async fn resolve(
        &self,
        folder: &RawFolderName,
        ranked: &[ScoredCandidate],
    ) -> Resolution {
        debug!(folder = %folder, candidates = ranked.len(), "auto-skipping ambiguous folder");
        Resolution::Skip
    }
}

/// Pre-recorded answer for one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedChoice {
    /// Pick the presented candidate with this source id.
    Pick(String),
    Skip,
    Abort,
}

/// Answers ambiguous folders from a map keyed by raw folder name.
///
/// Folders without an entry are skipped, as are picks naming a source id
/// that was not among the presented candidates.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptedResolver {
    answers: HashMap<String, ScriptedChoice>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(mut self, folder: impl Into<String>, source_id: impl Into<String>) -> Self {
        self.answers
            .insert(folder.into(), ScriptedChoice::Pick(source_id.into()));
        self
    }

    pub fn skip(mut self, folder: impl Into<String>) -> Self {
        self.answers.insert(folder.into(), ScriptedChoice::Skip);
        self
    }

    pub fn abort(mut self, folder: impl Into<String>) -> Self {
        self.answers.insert(folder.into(), ScriptedChoice::Abort);
        self
    }
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn resolve(
        &self,
        folder: &RawFolderName,
        ranked: &[ScoredCandidate],
    ) -> Resolution {
        match self.answers.get(folder.as_str()) {
            Some(ScriptedChoice::Pick(source_id)) => {
                match ranked.iter().find(|c| &c.candidate.source_id == source_id) {
                    Some(scored) => Resolution::Chosen(scored.candidate.clone()),
                    None => {
                        warn!(
                            folder = %folder,
                            source_id = %source_id,
                            "scripted pick is not among the presented candidates; skipping"
                        );
                        Resolution::Skip
                    }
                }
            }
            Some(ScriptedChoice::Abort) => Resolution::Abort,
            Some(ScriptedChoice::Skip) | None => Resolution::Skip,
        }
    }
}
