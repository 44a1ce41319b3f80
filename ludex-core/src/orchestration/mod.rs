//! Folder rename orchestration.
//!
//! Drives every discovered folder through clean, query, rank, resolve,
//! format and rename, and collects one terminal decision per folder.

pub mod config;
pub mod renamer;
pub mod summary;

pub use config::{RenamerOptions, ResolverMode};
pub use renamer::FolderRenameOrchestrator;
pub use summary::{RunCounts, RunSummary};
