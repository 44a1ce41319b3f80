use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use ludex_core::ResolverMode;
use ludex_core::providers::config::IGDB_MIN_REQUEST_INTERVAL;
use thiserror::Error;
use url::Url;

use super::models::RenamerConfig;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("games root {path} {reason}")]
    InvalidRoot { path: PathBuf, reason: &'static str },
    #[error("options.workers must be at least 1")]
    NoWorkers,
    #[error("catalog.{field} is not a valid URL")]
    InvalidCatalogUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("scripted resolver mode needs an answers file (--answers or `answers` in the config)")]
    MissingAnswers,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }
}

/// The games root must be an existing directory.
pub fn validate_games_root(path: &Path) -> Result<(), ConfigGuardRailError> {
    if !path.exists() {
        return Err(ConfigGuardRailError::InvalidRoot {
            path: path.to_path_buf(),
            reason: "does not exist",
        });
    }
    if !path.is_dir() {
        return Err(ConfigGuardRailError::InvalidRoot {
            path: path.to_path_buf(),
            reason: "is not a directory",
        });
    }
    Ok(())
}

/// Check the effective configuration before any folder is touched.
///
/// Fatal problems are returned as errors. Settings that are merely unwise
/// are corrected where that is safe (interactive runs drop to one worker)
/// and reported as warnings.
pub fn apply_guard_rails(
    config: &mut RenamerConfig,
    root: &Path,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_games_root(root)?;

    for (field, raw) in [
        ("api_base_url", config.catalog.api_base_url.as_str()),
        ("token_url", config.catalog.token_url.as_str()),
    ] {
        Url::parse(raw)
            .map_err(|source| ConfigGuardRailError::InvalidCatalogUrl { field, source })?;
    }

    if config.options.workers == 0 {
        return Err(ConfigGuardRailError::NoWorkers);
    }

    match config.options.resolver_mode {
        ResolverMode::Interactive => {
            if config.options.workers > 1 {
                warnings.push_with_hint(
                    format!(
                        "interactive mode answers one prompt at a time; \
                         using 1 worker instead of {}",
                        config.options.workers
                    ),
                    "Use --mode auto-skip to process folders concurrently",
                );
                config.options.workers = 1;
            }
            if !std::io::stdin().is_terminal() {
                warnings.push_with_hint(
                    "interactive mode without a terminal on stdin; prompts will fail",
                    "Use --mode auto-skip or --mode scripted for unattended runs",
                );
            }
        }
        ResolverMode::Scripted if config.answers.is_none() => {
            return Err(ConfigGuardRailError::MissingAnswers);
        }
        ResolverMode::Scripted | ResolverMode::AutoSkip => {}
    }

    if config.catalog.request_interval < IGDB_MIN_REQUEST_INTERVAL {
        warnings.push_with_hint(
            format!(
                "catalog.request_interval of {} is faster than IGDB allows",
                humantime::format_duration(config.catalog.request_interval)
            ),
            format!(
                "IGDB permits 4 requests per second; use at least {}",
                humantime::format_duration(IGDB_MIN_REQUEST_INTERVAL)
            ),
        );
    }

    if config.options.dry_run {
        warnings.push("dry run: no folder will be renamed");
    }

    Ok(warnings)
}
