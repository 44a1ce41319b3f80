use super::super::validation::ConfigGuardRailError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{var} is not set; IGDB client credentials are required")]
    MissingCredentials { var: &'static str },
    #[error("invalid {var} value '{value}'")]
    InvalidEnvValue { var: &'static str, value: String },
    #[error("failed to load ludex configuration: {0}")]
    Config(#[source] anyhow::Error),
    #[error("failed to load resolver answers from {path}")]
    Answers {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
