//! Turns files, environment and flags into one validated run configuration.

pub mod error;

pub use error::ConfigLoadError;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ludex_core::{IgdbCredentials, ResolverMode, ScriptedResolver};
use tracing::{debug, info};

use crate::models::{ConfigSources, RenamerConfig};
use crate::validation::{ConfigWarnings, apply_guard_rails};

pub const CLIENT_ID_VAR: &str = "IGDB_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "IGDB_CLIENT_SECRET";
pub const GAMES_FOLDER_VAR: &str = "GAMES_FOLDER";
pub const DRY_RUN_VAR: &str = "DRY_RUN";
pub const DEFAULT_GAMES_ROOT: &str = "/games";

/// Command-line values that override every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub answers: Option<PathBuf>,
    pub mode: Option<ResolverMode>,
    pub workers: Option<usize>,
    pub dry_run: bool,
    pub fail_fast: bool,
    pub no_skip_canonical: bool,
}

/// Validated configuration for one rename run.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: RenamerConfig,
    pub root: PathBuf,
    pub credentials: IgdbCredentials,
    pub sources: ConfigSources,
    pub warnings: ConfigWarnings,
}

/// Load `.env` (if present) into the process environment, then resolve the
/// configuration against it.
pub fn load_config(overrides: &CliOverrides) -> Result<LoadedConfig, ConfigLoadError> {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err.into()),
    }
    load_config_with(overrides, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(
    overrides: &CliOverrides,
    env: F,
) -> Result<LoadedConfig, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let (mut config, sources) =
        RenamerConfig::load_layered(overrides.config.as_deref(), &env)
            .map_err(ConfigLoadError::Config)?;

    // Environment layer.
    if let Some(root) = non_empty(&env, GAMES_FOLDER_VAR) {
        config.root = Some(PathBuf::from(root));
    }
    if let Some(raw) = non_empty(&env, DRY_RUN_VAR) {
        config.options.dry_run = parse_flag(&raw).ok_or(ConfigLoadError::InvalidEnvValue {
            var: DRY_RUN_VAR,
            value: raw,
        })?;
    }
    let client_id = non_empty(&env, CLIENT_ID_VAR)
        .ok_or(ConfigLoadError::MissingCredentials { var: CLIENT_ID_VAR })?;
    let client_secret = non_empty(&env, CLIENT_SECRET_VAR)
        .ok_or(ConfigLoadError::MissingCredentials { var: CLIENT_SECRET_VAR })?;

    // Flag layer.
    apply_overrides(&mut config, overrides);

    let root = config
        .root
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GAMES_ROOT));
    let warnings = apply_guard_rails(&mut config, &root)?;

    info!(
        root = %root.display(),
        config_file = ?sources.file,
        inline_json = sources.inline_json,
        mode = %config.options.resolver_mode,
        workers = config.options.workers,
        dry_run = config.options.dry_run,
        "configuration loaded"
    );

    Ok(LoadedConfig {
        config,
        root,
        credentials: IgdbCredentials::new(client_id, client_secret),
        sources,
        warnings,
    })
}

fn apply_overrides(config: &mut RenamerConfig, overrides: &CliOverrides) {
    if let Some(root) = &overrides.root {
        config.root = Some(root.clone());
    }
    if let Some(answers) = &overrides.answers {
        config.answers = Some(answers.clone());
    }
    if let Some(mode) = overrides.mode {
        config.options.resolver_mode = mode;
    }
    if let Some(workers) = overrides.workers {
        config.options.workers = workers;
    }
    if overrides.dry_run {
        config.options.dry_run = true;
    }
    if overrides.fail_fast {
        config.options.fail_fast = true;
    }
    if overrides.no_skip_canonical {
        config.options.skip_canonical = false;
    }
}

/// Read a scripted-resolver answers file: a JSON object mapping raw folder
/// names to `{"pick": "<source id>"}`, `"skip"` or `"abort"`.
pub fn load_answers(path: &Path) -> Result<ScriptedResolver, ConfigLoadError> {
    let wrap = |source: anyhow::Error| ConfigLoadError::Answers {
        path: path.to_path_buf(),
        source,
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(wrap)?;
    serde_json::from_str(&contents)
        .context("answers must be a JSON object keyed by folder name")
        .map_err(wrap)
}

fn non_empty<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
