use async_trait::async_trait;
use ludex_model::{CandidateRecord, FailureKind};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("rate limited")]
    RateLimited,

    #[error("invalid catalog credentials: {0}")]
    InvalidCredentials(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::RateLimited => FailureKind::RateLimited,
            ProviderError::Unavailable(_)
            | ProviderError::InvalidCredentials(_)
            | ProviderError::Network(_)
            | ProviderError::Parse(_) => FailureKind::CatalogUnavailable,
        }
    }
}

/// Read-only access to a game metadata catalog.
///
/// Implementations own their transport and authentication state and are
/// shared by every folder of a run, so they must be safe to call
/// concurrently and must respect the catalog's request budget themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Check credentials/configuration before any folder is processed.
    async fn verify(&self) -> Result<(), ProviderError>;

    /// Look up candidates for a cleaned title. An empty list is a valid
    /// answer, not an error.
    async fn search(&self, title: &str) -> Result<Vec<CandidateRecord>, ProviderError>;
}
