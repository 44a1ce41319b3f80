//! Folder name cleaning: turns release-styled folder names into catalog
//! search queries.

pub mod release_groups;
pub mod title_cleaner;

pub use release_groups::ReleaseGroupMatcher;
pub use title_cleaner::{CleanerConfig, TitleCleaner};
