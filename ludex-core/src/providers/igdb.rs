use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Datelike};
use ludex_model::CandidateRecord;
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::config::CatalogConfig;
use super::throttle::RequestThrottle;
use super::traits::{CatalogProvider, ProviderError};

/// Tokens are refreshed this long before Twitch says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Twitch application credentials used for the IGDB client-credential grant.
#[derive(Clone)]
pub struct IgdbCredentials {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
}

impl IgdbCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
        }
    }
}

impl fmt::Debug for IgdbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgdbCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

struct AccessToken {
    value: Zeroizing<String>,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct IgdbGame {
    id: u64,
    name: String,
    #[serde(default)]
    first_release_date: Option<i64>,
    #[serde(default)]
    version_parent: Option<u64>,
}

impl From<IgdbGame> for CandidateRecord {
    fn from(game: IgdbGame) -> Self {
        let release_year = game
            .first_release_date
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .and_then(|date| u16::try_from(date.year()).ok());
        CandidateRecord::new(game.name, release_year, format!("igdb:{}", game.id))
            .with_remake(game.version_parent.is_some())
    }
}

/// IGDB catalog client.
///
/// Owns the Twitch access token for the whole process: it is fetched on
/// `verify`, cached with its expiry, and refreshed transparently.
pub struct IgdbProvider {
    http: reqwest::Client,
    config: CatalogConfig,
    credentials: IgdbCredentials,
    token: RwLock<Option<AccessToken>>,
    throttle: RequestThrottle,
}

impl fmt::Debug for IgdbProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgdbProvider")
            .field("api_base_url", &self.config.api_base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl IgdbProvider {
    pub fn new(config: CatalogConfig, credentials: IgdbCredentials) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let throttle = RequestThrottle::new(config.request_interval);
        Ok(Self {
            http,
            config,
            credentials,
            token: RwLock::new(None),
            throttle,
        })
    }

    async fn access_token(&self) -> Result<Zeroizing<String>, ProviderError> {
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref()
                && token.is_fresh()
            {
                return Ok(token.value.clone());
            }
        }

        let mut guard = self.token.write().await;
        // Another worker may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref()
            && token.is_fresh()
        {
            return Ok(token.value.clone());
        }

        let token = self.authenticate().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn authenticate(&self) -> Result<AccessToken, ProviderError> {
        debug!(token_url = %self.config.token_url, "requesting IGDB access token");
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(ProviderError::InvalidCredentials(format!(
                "token endpoint returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "token endpoint returned {status}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Parse(err.to_string()))?;
        info!(expires_in = body.expires_in, "authenticated against IGDB");

        Ok(AccessToken {
            value: Zeroizing::new(body.access_token),
            expires_at: Instant::now() + Duration::from_secs(body.expires_in),
        })
    }

    async fn invalidate_token(&self) {
        self.token.write().await.take();
    }

    fn games_url(&self) -> String {
        format!("{}/games", self.config.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CatalogProvider for IgdbProvider {
    fn name(&self) -> &'static str {
        "igdb"
    }

    async fn verify(&self) -> Result<(), ProviderError> {
        self.access_token().await.map(|_| ())
    }

    async fn search(&self, title: &str) -> Result<Vec<CandidateRecord>, ProviderError> {
        let body = build_search_body(title, &self.config);

        // One retry covers a token revoked between expiry checks.
        for attempt in 0..2 {
            let token = self.access_token().await?;
            self.throttle.acquire().await;

            let response = self
                .http
                .post(self.games_url())
                .header("Client-ID", &self.credentials.client_id)
                .bearer_auth(token.as_str())
                .body(body.clone())
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let games: Vec<IgdbGame> = response
                        .json()
                        .await
                        .map_err(|err| ProviderError::Parse(err.to_string()))?;
                    debug!(title, results = games.len(), "IGDB search finished");
                    return Ok(games.into_iter().map(CandidateRecord::from).collect());
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!(title, "IGDB rate limit hit; backing off");
                    self.throttle.back_off(self.config.rate_limit_backoff).await;
                    return Err(ProviderError::RateLimited);
                }
                StatusCode::UNAUTHORIZED if attempt == 0 => {
                    warn!("IGDB rejected the access token; re-authenticating");
                    self.invalidate_token().await;
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(ProviderError::InvalidCredentials(
                        "access token rejected after refresh".to_string(),
                    ));
                }
                status => {
                    return Err(ProviderError::Unavailable(format!(
                        "IGDB search returned {status}"
                    )));
                }
            }
        }

        Err(ProviderError::Unavailable("IGDB search did not complete".to_string()))
    }
}

/// Apicalypse body for a game search.
pub fn build_search_body(title: &str, config: &CatalogConfig) -> String {
    let escaped = title.replace('\\', "\\\\").replace('"', "\\\"");

    let mut filters = Vec::new();
    if config.main_games_only {
        filters.push("category = 0".to_string());
    }
    if !config.platforms.is_empty() {
        let platforms = config
            .platforms
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        filters.push(format!("platforms = ({platforms})"));
    }

    let mut body = format!(
        "search \"{escaped}\"; fields name, first_release_date, version_parent;"
    );
    if !filters.is_empty() {
        body.push_str(&format!(" where {};", filters.join(" & ")));
    }
    body.push_str(&format!(" limit {};", config.result_limit));
    body
}
