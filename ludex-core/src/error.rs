use ludex_model::FailureKind;
use thiserror::Error;

use crate::fs::FsError;
use crate::naming::NamingError;
use crate::providers::ProviderError;

/// Anything that can end a single folder's pipeline early.
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("catalog error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("filesystem error: {0}")]
    Fs(#[from] FsError),
}

impl RenameError {
    /// Kind recorded on the folder's `Failed` decision.
    pub fn kind(&self) -> FailureKind {
        match self {
            RenameError::Provider(err) => err.kind(),
            RenameError::Naming(NamingError::InvalidCandidateName { .. }) => {
                FailureKind::InvalidCandidateName
            }
            RenameError::Fs(err) => err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_source_error() {
        let rate_limited = RenameError::from(ProviderError::RateLimited);
        assert_eq!(rate_limited.kind(), FailureKind::RateLimited);

        let naming = RenameError::from(NamingError::InvalidCandidateName {
            name: "???".into(),
        });
        assert_eq!(naming.kind(), FailureKind::InvalidCandidateName);
    }
}
