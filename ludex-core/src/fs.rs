use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ludex_model::{FailureKind, RawFolderName};
use thiserror::Error;
use tracing::{debug, warn};

/// Longest single path component accepted by the common target filesystems.
pub const MAX_NAME_BYTES: usize = 255;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("permission denied: {path:?}")]
    PermissionDenied { path: PathBuf },

    #[error("target already exists: {path:?}")]
    NameCollision { path: PathBuf },

    #[error("name too long: {path:?}")]
    PathTooLong { path: PathBuf },

    #[error("not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FsError::PermissionDenied { .. } => FailureKind::PermissionDenied,
            FsError::NameCollision { .. } => FailureKind::NameCollision,
            FsError::PathTooLong { .. } => FailureKind::PathTooLong,
            FsError::NotFound { .. } => FailureKind::NotFound,
            FsError::Io { .. } => FailureKind::Io,
        }
    }

    /// Classify an io error raised while touching `path`.
    pub fn from_io(source: io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path },
            io::ErrorKind::NotFound => FsError::NotFound { path },
            io::ErrorKind::AlreadyExists | io::ErrorKind::DirectoryNotEmpty => {
                FsError::NameCollision { path }
            }
            io::ErrorKind::InvalidFilename => FsError::PathTooLong { path },
            _ => FsError::Io { path, source },
        }
    }
}

/// Filesystem capability used by the orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryFs: Send + Sync {
    /// Directory entries directly under `root`, sorted by name. Anything
    /// that is not a directory is ignored.
    async fn list_folders(&self, root: &Path) -> Result<Vec<RawFolderName>, FsError>;

    /// Rename `from` to `to`. Never overwrites an existing entry.
    async fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;
}

/// Real filesystem implementation backed by tokio::fs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LibraryFs for LocalFs {
    async fn list_folders(&self, root: &Path) -> Result<Vec<RawFolderName>, FsError> {
        let mut entries = tokio::fs::read_dir(root)
            .await
            .map_err(|e| FsError::from_io(e, root))?;

        let mut folders = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FsError::from_io(e, root))?
        {
            let path = entry.path();
            // file_type() does not follow symlinks; metadata() does.
            let is_dir = match tokio::fs::metadata(&path).await {
                Ok(md) => md.is_dir(),
                Err(err) => {
                    warn!(path = ?path, error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !is_dir {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => folders.push(RawFolderName::new(name)),
                Err(name) => {
                    warn!(name = ?name, "skipping folder with non UTF-8 name");
                }
            }
        }

        folders.sort();
        debug!(root = ?root, folders = folders.len(), "listed library folders");
        Ok(folders)
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        if let Some(name) = to.file_name()
            && name.len() > MAX_NAME_BYTES
        {
            return Err(FsError::PathTooLong {
                path: to.to_path_buf(),
            });
        }

        if !tokio::fs::try_exists(from)
            .await
            .map_err(|e| FsError::from_io(e, from))?
        {
            return Err(FsError::NotFound {
                path: from.to_path_buf(),
            });
        }

        // On case-insensitive filesystems a case-only rename finds the
        // source itself at `to`; only a different entry is a collision.
        if tokio::fs::try_exists(to)
            .await
            .map_err(|e| FsError::from_io(e, to))?
            && !same_entry(from, to).await?
        {
            return Err(FsError::NameCollision {
                path: to.to_path_buf(),
            });
        }

        tokio::fs::rename(from, to)
            .await
            .map_err(|e| FsError::from_io(e, to))
    }
}

/// Whether both paths resolve to the same directory entry.
#[cfg(unix)]
async fn same_entry(from: &Path, to: &Path) -> Result<bool, FsError> {
    use std::os::unix::fs::MetadataExt;

    let source = tokio::fs::metadata(from)
        .await
        .map_err(|e| FsError::from_io(e, from))?;
    let target = tokio::fs::metadata(to)
        .await
        .map_err(|e| FsError::from_io(e, to))?;
    Ok(source.dev() == target.dev() && source.ino() == target.ino())
}

#[cfg(not(unix))]
async fn same_entry(from: &Path, to: &Path) -> Result<bool, FsError> {
    let source = tokio::fs::canonicalize(from)
        .await
        .map_err(|e| FsError::from_io(e, from))?;
    let target = tokio::fs::canonicalize(to)
        .await
        .map_err(|e| FsError::from_io(e, to))?;
    Ok(source == target)
}
