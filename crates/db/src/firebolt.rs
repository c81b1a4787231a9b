//! REST client for Firebolt.
//!
//! Connection setup is three round trips, done lazily on the first query and
//! cached afterwards:
//!
//! 1. `POST {auth_url}/oauth/token` exchanges the client credentials for a
//!    bearer token.
//! 2. `GET {api_url}/web/v3/account/{account}/engineUrl` returns the
//!    account's system engine URL.
//! 3. The system engine is asked for the configured engine's URL via
//!    `information_schema.engines`.
//!
//! Queries are then `POST`ed as plain SQL text to the engine URL with
//! `database` and `output_format=JSON_Compact` query parameters.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::{Credentials, FireboltConfig};
use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::result::ResultSet;

/// Audience claim requested for API access tokens.
const TOKEN_AUDIENCE: &str = "https://api.firebolt.io";

/// Tokens are refreshed this long before they expire.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

const OUTPUT_FORMAT: &str = "JSON_Compact";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngineUrlResponse {
    engine_url: String,
}

#[derive(Debug, Deserialize)]
struct EngineRow {
    url: String,
    #[serde(default)]
    status: Option<String>,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Default)]
struct Session {
    token: Option<CachedToken>,
    engine_url: Option<String>,
}

/// HTTP client for one Firebolt account, database and engine.
pub struct FireboltClient {
    client: reqwest::Client,
    config: FireboltConfig,
    session: Mutex<Session>,
}

impl FireboltClient {
    pub fn new(config: FireboltConfig) -> Result<Self, DbError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: FireboltConfig) -> Self {
        Self {
            client,
            config,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn config(&self) -> &FireboltConfig {
        &self.config
    }

    /// Drop the cached token and engine URL so the next query reconnects.
    pub async fn reset(&self) {
        *self.session.lock().await = Session::default();
    }

    // ---- connection setup ----

    /// Return a valid token and the resolved engine URL, fetching either if
    /// missing or stale.
    async fn connection(&self) -> Result<(String, String), DbError> {
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or(DbError::MissingCredentials)?;

        let mut session = self.session.lock().await;

        let cached = session
            .token
            .as_ref()
            .filter(|c| c.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN)
            .map(|c| c.token.clone());

        let token = match cached {
            Some(token) => token,
            None => {
                let fresh = self.fetch_token(credentials).await?;
                let token = fresh.token.clone();
                session.token = Some(fresh);
                // A new token may belong to a different session; resolve
                // the engine again.
                session.engine_url = None;
                token
            }
        };

        let engine_url = match session.engine_url.clone() {
            Some(url) => url,
            None => {
                let url = self.resolve_engine_url(&token).await?;
                session.engine_url = Some(url.clone());
                url
            }
        };

        Ok((token, engine_url))
    }

    async fn fetch_token(&self, credentials: &Credentials) -> Result<CachedToken, DbError> {
        tracing::debug!(client_id = %credentials.client_id, "Requesting Firebolt access token");

        let response = self
            .client
            .post(format!("{}/oauth/token", self.config.auth_url.trim_end_matches('/')))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("audience", TOKEN_AUDIENCE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(DbError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| DbError::Decode(format!("token response: {e}")))?;

        Ok(CachedToken {
            token: parsed.access_token,
            expires_at: Instant::now() + Duration::from_secs(parsed.expires_in),
        })
    }

    async fn resolve_engine_url(&self, token: &str) -> Result<String, DbError> {
        let response = self
            .client
            .get(format!(
                "{}/web/v3/account/{}/engineUrl",
                self.config.api_url.trim_end_matches('/'),
                self.config.account
            ))
            .bearer_auth(token)
            .send()
            .await?;
        let system: EngineUrlResponse = parse_json(response).await?;
        let system_url = with_scheme(&system.engine_url);
        tracing::debug!(%system_url, "Resolved system engine");

        let sql = format!(
            "SELECT url, status FROM information_schema.engines WHERE engine_name = {}",
            geodemo_core::sql::quote_str(&self.config.engine)
        );
        let response = self
            .client
            .post(&system_url)
            .query(&[("output_format", OUTPUT_FORMAT)])
            .bearer_auth(token)
            .body(sql)
            .send()
            .await?;
        let body = ensure_success(response).await?.text().await?;
        let engines: Vec<EngineRow> = ResultSet::from_compact(&body)?.decode()?;

        let engine = engines
            .into_iter()
            .next()
            .ok_or_else(|| DbError::EngineNotFound(self.config.engine.clone()))?;
        if let Some(status) = engine.status.as_deref() {
            tracing::debug!(engine = %self.config.engine, %status, "Engine status");
        }

        let url = with_scheme(&engine.url);
        tracing::info!(engine = %self.config.engine, %url, "Resolved Firebolt engine");
        Ok(url)
    }
}

#[async_trait]
impl QueryExecutor for FireboltClient {
    async fn execute(&self, sql: &str) -> Result<ResultSet, DbError> {
        let (token, engine_url) = self.connection().await?;
        let started = Instant::now();

        let response = self
            .client
            .post(&engine_url)
            .query(&[
                ("database", self.config.database.as_str()),
                ("output_format", OUTPUT_FORMAT),
            ])
            .bearer_auth(&token)
            .body(sql.to_string())
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Token revoked server-side; force a reconnect next time.
            self.reset().await;
        }

        let body = ensure_success(response).await?.text().await?;
        let result = ResultSet::from_compact(&body)?;

        tracing::debug!(
            rows = result.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Query executed"
        );
        Ok(result)
    }
}

// ---- private helpers ----

/// Engine URLs come back without a scheme (`host/path`).
fn with_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

async fn read_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string())
}

/// Ensure the response has a success status code, turning failures into
/// [`DbError::Api`] with the body text.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DbError> {
    let status = response.status();
    if !status.is_success() {
        let body = read_body(response).await;
        return Err(DbError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DbError> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| DbError::Decode(e.to_string()))
}
