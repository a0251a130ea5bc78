//! breeze-geo — geocoding lookup client for breeze.
//!
//! Resolves a free-text place name to [`Location`] candidates via the
//! OpenWeatherMap direct-geocoding endpoint. The client is cheap to clone
//! (it wraps a pooled [`reqwest::Client`]), so the UI hands clones to each
//! lookup task.
//!
//! Failures never propagate past the fetch boundary: callers map a
//! [`GeoError`] to an error status flag and keep whatever results they
//! already have.

use breeze_core::config::GeocodingConfig;
use breeze_core::Location;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures of a single geocoding lookup. No retry is attempted.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("invalid geocoding endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Transport, timeout, or body-decode failure from the HTTP client.
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoding service returned {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the direct-geocoding endpoint.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    limit: u8,
}

impl GeoClient {
    /// Build a client for `endpoint`, authenticating with `api_key` and
    /// requesting at most `limit` candidates per lookup.
    pub fn new(endpoint: &str, api_key: impl Into<String>, limit: u8) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.into(),
            limit,
        })
    }

    /// Build a client from the `[geocoding]` config section plus a resolved
    /// API key.
    pub fn from_config(cfg: &GeocodingConfig, api_key: impl Into<String>) -> Result<Self, GeoError> {
        Self::new(&cfg.endpoint, api_key, cfg.limit)
    }

    /// The lookup URL for `query`: endpoint plus `q`, `limit`, and `appid`
    /// query pairs. The query text is embedded exactly as given (modulo
    /// percent-encoding).
    pub fn lookup_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &self.limit.to_string())
            .append_pair("appid", &self.api_key);
        url
    }

    /// Resolve `query` to location candidates.
    pub async fn lookup(&self, query: &str) -> Result<Vec<Location>, GeoError> {
        let url = self.lookup_url(query);
        tracing::debug!(query, "geo: lookup");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status(status));
        }

        let locations: Vec<Location> = response.json().await?;
        tracing::debug!(query, count = locations.len(), "geo: lookup complete");
        Ok(locations)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
