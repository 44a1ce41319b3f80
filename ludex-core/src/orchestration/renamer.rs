use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::StreamExt;
use futures::stream;
use ludex_model::{CandidateRecord, RawFolderName, RenameDecision, RenameOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::RenamerOptions;
use super::summary::RunSummary;
use crate::error::RenameError;
use crate::fs::{FsError, LibraryFs};
use crate::matching::{MatchAssessment, assess, rank_candidates};
use crate::metadata::TitleCleaner;
use crate::naming::{format_folder_name, is_canonical_folder_name};
use crate::providers::CatalogProvider;
use crate::resolution::{Resolution, Resolver, presentable};

pub const REASON_ALREADY_CANONICAL: &str = "already canonical";
pub const REASON_NAME_UNCHANGED: &str = "name unchanged";
pub const REASON_NO_MATCH: &str = "no catalog match";
pub const REASON_RESOLVER_SKIP: &str = "skipped by resolver";
pub const REASON_USER_ABORT: &str = "aborted by user";
pub const REASON_RUN_ABORTED: &str = "run aborted";

/// Runs every folder under a library root through the rename pipeline.
///
/// The catalog client and the result list are the only things folders
/// share. A failing folder never stops the run unless `fail_fast` is set;
/// cancellation (fail-fast, a resolver abort or the caller's token) is
/// observed only between folders, so an in-flight rename always completes.
pub struct FolderRenameOrchestrator {
    catalog: Arc<dyn CatalogProvider>,
    fs: Arc<dyn LibraryFs>,
    resolver: Arc<dyn Resolver>,
    cleaner: TitleCleaner,
    options: RenamerOptions,
    cancel: CancellationToken,
    /// Folder names a dry run would leave behind: listed names minus
    /// planned sources plus planned targets.
    planned: Mutex<HashSet<String>>,
}

impl fmt::Debug for FolderRenameOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderRenameOrchestrator")
            .field("catalog", &self.catalog.name())
            .field("interactive", &self.resolver.is_interactive())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl FolderRenameOrchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        fs: Arc<dyn LibraryFs>,
        resolver: Arc<dyn Resolver>,
        cleaner: TitleCleaner,
        options: RenamerOptions,
    ) -> Self {
        Self {
            catalog,
            fs,
            resolver,
            cleaner,
            options,
            cancel: CancellationToken::new(),
            planned: Mutex::new(HashSet::new()),
        }
    }

    /// Token that stops the run at the next folder boundary when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Folders processed at once. A human answers one prompt at a time.
    pub fn effective_workers(&self) -> usize {
        if self.resolver.is_interactive() {
            1
        } else {
            self.options.workers.max(1)
        }
    }

    /// Process every folder under `root`. Only listing the root can fail;
    /// per-folder errors end up as `Failed` decisions in the summary.
    pub async fn run(&self, root: &Path) -> Result<RunSummary, FsError> {
        let folders = self.fs.list_folders(root).await?;
        let workers = self.effective_workers();
        *self.planned_names() = folders.iter().map(|f| f.as_str().to_string()).collect();
        info!(
            root = %root.display(),
            folders = folders.len(),
            workers,
            catalog = self.catalog.name(),
            dry_run = self.options.dry_run,
            "starting rename run"
        );

        // `buffered` keeps results in discovery order.
        let decisions: Vec<RenameDecision> = stream::iter(folders)
            .map(|folder| self.process_guarded(root, folder))
            .buffered(workers)
            .collect()
            .await;

        let summary = RunSummary::new(decisions);
        info!(
            renamed = summary.counts.renamed,
            skipped = summary.counts.skipped,
            failed = summary.counts.failed,
            unresolved = summary.counts.unresolved,
            "rename run finished"
        );
        Ok(summary)
    }

    async fn process_guarded(&self, root: &Path, folder: RawFolderName) -> RenameDecision {
        if self.cancel.is_cancelled() {
            debug!(folder = %folder, "run cancelled before folder started");
            return RenameDecision::skipped(folder, REASON_RUN_ABORTED);
        }

        let decision = self.process_folder(root, folder).await;
        log_decision(&decision);

        if decision.outcome == RenameOutcome::Failed && self.options.fail_fast {
            warn!(
                folder = %decision.raw_folder_name,
                "fail-fast: cancelling remaining folders"
            );
            self.cancel.cancel();
        }
        decision
    }

    /// One folder from discovery to its terminal decision.
    pub async fn process_folder(&self, root: &Path, raw: RawFolderName) -> RenameDecision {
        if self.options.skip_canonical && is_canonical_folder_name(raw.as_str()) {
            return RenameDecision::skipped(raw, REASON_ALREADY_CANONICAL);
        }

        let cleaned = self.cleaner.clean(raw.as_str());

        let candidates = match self.catalog.search(&cleaned.search_title).await {
            Ok(candidates) => candidates,
            Err(err) => return failure(raw, RenameError::from(err)),
        };
        debug!(folder = %raw, candidates = candidates.len(), "queried catalog");

        let ranked = rank_candidates(&cleaned, raw.as_str(), &candidates);
        let chosen = match assess(ranked) {
            MatchAssessment::NoMatch => {
                return RenameDecision::unresolved(raw, REASON_NO_MATCH);
            }
            MatchAssessment::Confident(top) => {
                debug!(
                    folder = %raw,
                    candidate = %top.candidate,
                    score = top.score,
                    "confident match"
                );
                top.candidate
            }
            MatchAssessment::Ambiguous(ranked) => {
                debug!(
                    folder = %raw,
                    candidates = ranked.len(),
                    "ambiguous match; consulting resolver"
                );
                match self.resolver.resolve(&raw, presentable(&ranked)).await {
                    Resolution::Chosen(candidate) => candidate,
                    Resolution::Skip => {
                        return RenameDecision::skipped(raw, REASON_RESOLVER_SKIP);
                    }
                    Resolution::Abort => {
                        info!(folder = %raw, "run aborted from resolver");
                        self.cancel.cancel();
                        return RenameDecision::skipped(raw, REASON_USER_ABORT);
                    }
                }
            }
        };

        self.apply(root, raw, chosen).await
    }

    async fn apply(
        &self,
        root: &Path,
        raw: RawFolderName,
        candidate: CandidateRecord,
    ) -> RenameDecision {
        let new_name = match format_folder_name(&candidate) {
            Ok(name) => name,
            Err(err) => {
                return failure(raw, RenameError::from(err)).with_candidate(candidate);
            }
        };

        if new_name == raw.as_str() {
            return RenameDecision::skipped(raw, REASON_NAME_UNCHANGED).with_candidate(candidate);
        }

        if self.options.dry_run {
            return self.plan(root, raw, candidate, new_name);
        }

        let from = root.join(raw.as_str());
        let to = root.join(&new_name);
        match self.fs.rename(&from, &to).await {
            Ok(()) => RenameDecision::renamed(raw, candidate, new_name, false),
            Err(err) => failure(raw, RenameError::from(err)).with_candidate(candidate),
        }
    }

    /// Dry-run stand-in for the rename: a target that exists, or that an
    /// earlier folder of this run already claimed, is a collision.
    fn plan(
        &self,
        root: &Path,
        raw: RawFolderName,
        candidate: CandidateRecord,
        new_name: String,
    ) -> RenameDecision {
        let mut planned = self.planned_names();
        if planned.contains(&new_name) {
            let err = FsError::NameCollision {
                path: root.join(&new_name),
            };
            return failure(raw, RenameError::from(err)).with_candidate(candidate);
        }
        planned.remove(raw.as_str());
        planned.insert(new_name.clone());
        RenameDecision::renamed(raw, candidate, new_name, true)
    }

    fn planned_names(&self) -> MutexGuard<'_, HashSet<String>> {
        self.planned.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn failure(raw: RawFolderName, err: RenameError) -> RenameDecision {
    RenameDecision::failed(raw, err.kind(), err.to_string())
}

fn log_decision(decision: &RenameDecision) {
    let folder = &decision.raw_folder_name;
    let detail = decision.detail.as_deref().unwrap_or_default();
    match decision.outcome {
        RenameOutcome::Renamed => info!(
            folder = %folder,
            new_name = decision.new_name.as_deref().unwrap_or_default(),
            dry_run = decision.dry_run,
            "renamed"
        ),
        RenameOutcome::Skipped => info!(folder = %folder, reason = detail, "skipped"),
        RenameOutcome::Unresolved => info!(folder = %folder, reason = detail, "unresolved"),
        RenameOutcome::Failed => warn!(
            folder = %folder,
            kind = ?decision.failure,
            error = detail,
            "failed"
        ),
    }
}
