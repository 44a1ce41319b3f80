//! # Ludex Core
//!
//! Engine behind the Ludex game folder renamer. It turns release-styled
//! folder names such as `Dead.Space-RUNE` into catalog-backed canonical
//! names such as `Dead Space (2008)`.
//!
//! ## Pipeline
//!
//! - [`metadata`]: strips separators, release-group suffixes, version
//!   markers and scene tags from a raw folder name, keeping year and
//!   edition hints.
//! - [`providers`]: catalog lookup contract plus the IGDB client, with a
//!   request throttle shared by every concurrent search.
//! - [`matching`]: scores and orders candidates, then decides whether a
//!   single winner is confident enough to rename automatically.
//! - [`resolution`]: settles ambiguous candidate sets (human, scripted or
//!   auto-skip).
//! - [`naming`]: renders `<name> (<year>)` folder names that are legal on
//!   common filesystems.
//! - [`orchestration`]: runs each discovered folder through the above and
//!   collects one terminal decision per folder into a [`RunSummary`].
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use ludex_core::{
//!     AutoSkipResolver, CatalogConfig, CleanerConfig, FolderRenameOrchestrator,
//!     IgdbCredentials, IgdbProvider, LocalFs, RenamerOptions, TitleCleaner,
//! };
//!
//! async fn rename_library() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = IgdbCredentials::new("client-id", "client-secret");
//!     let catalog = IgdbProvider::new(CatalogConfig::default(), credentials)?;
//!
//!     let orchestrator = FolderRenameOrchestrator::new(
//!         Arc::new(catalog),
//!         Arc::new(LocalFs::new()),
//!         Arc::new(AutoSkipResolver),
//!         TitleCleaner::new(&CleanerConfig::default()),
//!         RenamerOptions::default(),
//!     );
//!
//!     let summary = orchestrator.run(Path::new("/games")).await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

/// Error taxonomy for a single folder's pipeline
pub mod error;
/// Filesystem capability: folder listing and renames
pub mod fs;
pub mod matching;
pub mod metadata;
pub mod naming;
pub mod orchestration;
pub mod providers;
pub mod resolution;

pub use error::RenameError;
pub use fs::{FsError, LibraryFs, LocalFs};
pub use matching::{MatchAssessment, assess, rank_candidates};
pub use metadata::{CleanerConfig, TitleCleaner};
pub use naming::{NamingError, format_folder_name};
pub use orchestration::{
    FolderRenameOrchestrator, RenamerOptions, ResolverMode, RunCounts, RunSummary,
};
pub use providers::{
    CatalogConfig, CatalogProvider, IgdbCredentials, IgdbProvider, ProviderError,
};
pub use resolution::{
    AutoSkipResolver, Resolution, Resolver, ScriptedChoice, ScriptedResolver,
};

pub use ludex_model as model;
