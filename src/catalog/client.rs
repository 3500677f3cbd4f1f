//! TMDB HTTP client
//!
//! Handles the two catalog calls the resolver needs:
//! - `GET /tv/{id}` to confirm an id is a top-level series
//! - `GET /find/{external_id}` to map an IMDb/TVDB id to a TMDB show id
//!
//! One attempt per call. Timeouts come from the reqwest client and surface as
//! [`CatalogError::Network`] like any other transport failure.

use std::time::Duration;

use super::{CatalogError, ExternalSource, adapter, dto};
use crate::config::CatalogConfig;

/// TMDB API client
pub struct TmdbClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    /// Create a client with default settings and the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(&CatalogConfig::default(), api_key)
    }

    /// Create a client from catalog settings
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent header identifying the application
    /// - Give up on a request after `timeout_secs`
    pub fn from_config(config: &CatalogConfig, api_key: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            language: "zh-CN".to_string(),
        }
    }

    /// Check that `tmdb_id` names a series in the catalog.
    ///
    /// HTTP 404, a status-code-34 body and a `success: false` body are all a
    /// plain `Ok(false)`. Anything else that goes wrong is an error.
    pub async fn verify_series(&self, tmdb_id: u64) -> Result<bool, CatalogError> {
        let url = format!(
            "{}/tv/{}?api_key={}&language={}",
            self.base_url,
            tmdb_id,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language)
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!(tmdb_id, "TMDB id does not exist");
            return Ok(false);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !status.is_success() {
            // TMDB error bodies still carry a status envelope
            if let Ok(envelope) = serde_json::from_str::<dto::StatusResponse>(&body) {
                if envelope.status_code == Some(dto::STATUS_NOT_FOUND) {
                    tracing::warn!(tmdb_id, "TMDB reported status code 34");
                    return Ok(false);
                }
                if let Some(message) = envelope.status_message {
                    return Err(CatalogError::Api(message));
                }
            }
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        if body.trim().is_empty() {
            tracing::warn!(tmdb_id, "TMDB returned an empty body");
            return Ok(false);
        }

        let envelope: dto::StatusResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let verified = adapter::is_verified(&envelope);
        if !verified {
            tracing::warn!(
                tmdb_id,
                status_code = ?envelope.status_code,
                success = ?envelope.success,
                "TMDB rejected id"
            );
        }
        Ok(verified)
    }

    /// Look up catalog entries by an external id.
    pub async fn find_by_external_id(
        &self,
        external_id: &str,
        source: ExternalSource,
    ) -> Result<dto::FindResponse, CatalogError> {
        let url = format!(
            "{}/find/{}?api_key={}&external_source={}&language={}",
            self.base_url,
            urlencoding::encode(external_id),
            urlencoding::encode(&self.api_key),
            source.as_query(),
            urlencoding::encode(&self.language)
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(envelope) = response.json::<dto::StatusResponse>().await
                && let Some(message) = envelope.status_message
            {
                return Err(CatalogError::Api(message));
            }
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::FindResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}
