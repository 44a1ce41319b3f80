use anyhow::{Context, anyhow};
use ludex_core::{CatalogConfig, CleanerConfig, RenamerOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_PATH_VAR: &str = "LUDEX_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "LUDEX_CONFIG_JSON";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigSources {
    /// File layered over the defaults, if any.
    pub file: Option<PathBuf>,
    /// `$LUDEX_CONFIG_JSON` was layered over the file.
    pub inline_json: bool,
}

/// Everything a rename run can be tuned with, minus credentials.
///
/// Credentials never live in config files; they come from the environment
/// (or `.env`) and are held in zeroizing buffers.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenamerConfig {
    /// Library root holding one folder per game.
    pub root: Option<PathBuf>,
    /// JSON answers file for the scripted resolver.
    pub answers: Option<PathBuf>,
    /// Extra release groups and edition markers.
    pub cleaner: CleanerConfig,
    /// IGDB endpoints and request budget.
    pub catalog: CatalogConfig,
    /// Dry run, resolver mode, worker count, fail-fast and canonical skipping.
    pub options: RenamerOptions,
}

impl RenamerConfig {
    /// Build the file-backed part of the configuration.
    ///
    /// Layers, later wins:
    /// 1) built-in defaults,
    /// 2) `explicit` path, else `$LUDEX_CONFIG_PATH`, else the first default
    ///    file found (`ludex.toml`, `ludex.json`, `config/ludex.toml`),
    /// 3) `$LUDEX_CONFIG_JSON` (inline JSON, merged key by key).
    pub fn load_layered<F>(
        explicit: Option<&Path>,
        env: F,
    ) -> anyhow::Result<(Self, ConfigSources)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut sources = ConfigSources::default();
        let mut merged = serde_json::to_value(Self::default())
            .context("failed to serialize default configuration")?;

        let file = explicit.map(Path::to_path_buf).or_else(|| {
            env(CONFIG_PATH_VAR)
                .filter(|raw| !raw.trim().is_empty())
                .map(PathBuf::from)
                .or_else(Self::find_default_file)
        });

        if let Some(path) = file {
            let layer = Self::read_layer(&path)?;
            merge_values(&mut merged, layer);
            sources.file = Some(path);
        }

        if let Some(raw) = env(CONFIG_JSON_VAR).filter(|raw| !raw.trim().is_empty()) {
            let layer: Value = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            merge_values(&mut merged, layer);
            sources.inline_json = true;
        }

        let config = serde_json::from_value(merged)
            .map_err(|err| anyhow!("invalid ludex configuration: {err}"))?;
        Ok((config, sources))
    }

    /// Parse a config file into a generic value so it can be layered.
    fn read_layer(path: &Path) -> anyhow::Result<Value> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read ludex config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents).with_context(|| {
                format!("invalid ludex config {}", path.display())
            }),
            Some("toml") | Some("tml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid ludex config {}: {}", path.display(), err)
            }),
            _ => Self::parse_layer(&contents, &path.display().to_string()),
        }
    }

    fn parse_layer(contents: &str, origin: &str) -> anyhow::Result<Value> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse ludex config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] =
            &["ludex.toml", "ludex.json", "config/ludex.toml", "config/ludex.json"];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}

/// Recursive object merge; non-object values in `layer` replace `base`.
fn merge_values(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}
