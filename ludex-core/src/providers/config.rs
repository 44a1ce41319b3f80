use std::time::Duration;

use serde::{Deserialize, Serialize};

/// IGDB's published budget is four requests per second.
pub const IGDB_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(250);

/// Catalog endpoint and request-budget settings.
///
/// Credentials are not part of this struct; they come from
/// the environment and are kept in zeroizing buffers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the IGDB v4 API.
    pub api_base_url: String,
    /// Twitch OAuth token endpoint used for client-credential grants.
    pub token_url: String,
    /// IGDB platform ids to restrict results to (6 = PC). Empty disables
    /// the platform filter.
    pub platforms: Vec<u32>,
    /// Restrict results to main games (IGDB `category = 0`).
    pub main_games_only: bool,
    /// Maximum candidates requested per search.
    pub result_limit: u32,
    /// Minimum spacing between catalog requests, shared by all workers.
    #[serde(with = "duration_str")]
    pub request_interval: Duration,
    /// Extra pause applied to every worker after a rate-limit response.
    #[serde(with = "duration_str")]
    pub rate_limit_backoff: Duration,
    /// Per-request HTTP timeout.
    #[serde(with = "duration_str")]
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.igdb.com/v4".to_string(),
            token_url: "https://id.twitch.tv/oauth2/token".to_string(),
            platforms: vec![6],
            main_games_only: true,
            result_limit: 5,
            request_interval: IGDB_MIN_REQUEST_INTERVAL,
            rate_limit_backoff: Duration::from_secs(1),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Durations are written the human way ("250ms", "1s") in config files.
mod duration_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(raw.trim()).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_parse_from_human_strings() {
        let config: CatalogConfig = serde_json::from_str(
            r#"{ "request_interval": "500ms", "rate_limit_backoff": "3s" }"#,
        )
        .expect("valid catalog config");

        assert_eq!(config.request_interval, Duration::from_millis(500));
        assert_eq!(config.rate_limit_backoff, Duration::from_secs(3));
        assert_eq!(config.platforms, vec![6]);
        assert_eq!(config.result_limit, 5);
    }

    #[test]
    fn invalid_duration_is_rejected() {
        let result: Result<CatalogConfig, _> =
            serde_json::from_str(r#"{ "request_interval": "soon" }"#);
        assert!(result.is_err());
    }
}
