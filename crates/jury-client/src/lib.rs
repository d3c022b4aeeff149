//! # jury-client -- Typed client for the roster service
//!
//! Async access to the two backend collaborators of the roster editor:
//!
//! | Method | Path | Call |
//! |--------|------|------|
//! | GET    | `/api/v1/events/{eventId}/jury` | [`JuryClient::load_roster`] |
//! | PUT    | `/api/v1/events/{eventId}/jury` | [`JuryClient::save_roster`] |
//! | GET    | `/api/v1/events/{eventId}/officials?scope=regional\|national` | [`JuryClient::list_officials`] |
//!
//! Bodies are the camelCase JSON of [`jury_roster::Position`] and
//! [`jury_core::Official`]. A save sends the full list of positions as
//! the desired end state; the service drops rows marked for erase.
//!
//! Calls are not retried. A failed save leaves the caller's session
//! unlocked so the operator can submit again.

pub mod config;
pub mod error;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use jury_core::{EventId, Official, Scope};
use jury_roster::{Position, SubmissionBatch};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Client for the roster service.
#[derive(Debug, Clone)]
pub struct JuryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl JuryClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = config.api_token.as_deref() {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| ConfigError::InvalidToken)?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch every position of the event, with original snapshots.
    pub async fn load_roster(&self, event_id: &EventId) -> Result<Vec<Position>, ClientError> {
        let endpoint = format!("GET /events/{}/jury", event_id.as_str());
        let url = self.url(&["events", event_id.as_str(), "jury"])?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        let positions: Vec<Position> = decode(endpoint, resp).await?;
        tracing::info!(event_id = %event_id, positions = positions.len(), "fetched roster");
        Ok(positions)
    }

    /// Persist a submission batch as the event's roster.
    pub async fn save_roster(&self, batch: &SubmissionBatch) -> Result<(), ClientError> {
        let endpoint = format!("PUT /events/{}/jury", batch.event_id.as_str());
        let url = self.url(&["events", batch.event_id.as_str(), "jury"])?;

        let resp = self
            .http
            .put(url)
            .json(&batch.positions)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(api_error(endpoint, resp).await);
        }
        tracing::info!(
            event_id = %batch.event_id,
            positions = batch.positions.len(),
            "saved roster"
        );
        Ok(())
    }

    /// Officials the `scope` operator may assign for the event.
    pub async fn list_officials(
        &self,
        scope: Scope,
        event_id: &EventId,
    ) -> Result<Vec<Official>, ClientError> {
        let endpoint = format!("GET /events/{}/officials", event_id.as_str());
        let mut url = self.url(&["events", event_id.as_str(), "officials"])?;
        url.query_pairs_mut().append_pair("scope", scope.as_str());

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        decode(endpoint, resp).await
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::InvalidUrl(self.base_url.to_string(), "cannot be a base URL".into())
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }
}

async fn api_error(endpoint: String, resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(%endpoint, status, "roster service returned error");
    ClientError::Api {
        endpoint,
        status,
        body,
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: String,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        return Err(api_error(endpoint, resp).await);
    }
    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint,
        source: e,
    })
}
