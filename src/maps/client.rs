//! Google Maps HTTP client with deadlines and retries.
//!
//! # Responsibilities
//! - Build endpoint URLs from the configured base and attach the API key
//! - Enforce a deadline on every attempt, surfacing timeouts distinctly
//! - Retry transient transport failures (connect, timeout, 5xx, 429)
//! - Decode JSON payloads; provider statuses are left to the caller

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{MapsConfig, RetryConfig};
use crate::location::types::GeoCoordinate;
use crate::maps::types::{DirectionsResponse, GeocodeResponse, PlaceDetailsResponse, TravelMode};
use crate::observability::metrics;
use crate::resilience::{retry_transient, with_deadline, Transient};

/// Failures talking to the provider. Provider-level statuses such as
/// `ZERO_RESULTS` are not errors here.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Connection or request failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// No response within the deadline.
    #[error("provider did not respond within {0:?}")]
    Timeout(Duration),

    /// Non-2xx HTTP status.
    #[error("provider returned HTTP {0}")]
    Http(u16),

    /// Body was not the expected JSON.
    #[error("undecodable provider response: {0}")]
    Decode(String),

    /// The configured base URL is not usable.
    #[error("invalid provider base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl MapsError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            MapsError::Transport(_) => "transport",
            MapsError::Timeout(_) => "timeout",
            MapsError::Http(_) => "http_status",
            MapsError::Decode(_) => "decode",
            MapsError::InvalidBaseUrl(_) => "config",
        }
    }
}

impl Transient for MapsError {
    fn is_transient(&self) -> bool {
        match self {
            MapsError::Transport(_) | MapsError::Timeout(_) => true,
            MapsError::Http(status) => *status >= 500 || *status == 429,
            MapsError::Decode(_) | MapsError::InvalidBaseUrl(_) => false,
        }
    }
}

/// Client for the Geocoding, Directions and Place Details endpoints.
#[derive(Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl MapsClient {
    /// Create a client. The configuration must already be validated.
    pub fn new(config: &MapsConfig, retry: RetryConfig) -> Result<Self, MapsError> {
        url::Url::parse(&config.base_url)
            .map_err(|_| MapsError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(MapsError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            retry,
        })
    }

    /// Forward geocoding of a free-text address.
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResponse, MapsError> {
        self.get_json("geocode", "geocode/json", &[("address", address.to_string())])
            .await
    }

    /// Reverse geocoding of a coordinate.
    pub async fn reverse_geocode(&self, at: GeoCoordinate) -> Result<GeocodeResponse, MapsError> {
        self.get_json("reverse_geocode", "geocode/json", &[("latlng", at.query_value())])
            .await
    }

    /// Directions between two coordinates, asking for alternative routes.
    pub async fn directions(
        &self,
        origin: GeoCoordinate,
        destination: GeoCoordinate,
        mode: TravelMode,
    ) -> Result<DirectionsResponse, MapsError> {
        let params = [
            ("origin", origin.query_value()),
            ("destination", destination.query_value()),
            ("mode", mode.as_str().to_string()),
            ("alternatives", "true".to_string()),
        ];
        self.get_json("directions", "directions/json", &params).await
    }

    /// Place Details restricted to `fields`.
    pub async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetailsResponse, MapsError> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", fields.join(",")),
        ];
        self.get_json("place_details", "place/details/json", &params).await
    }

    async fn get_json<T>(
        &self,
        api: &'static str,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, MapsError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let url = url.as_str();
        let start = Instant::now();

        let result = retry_transient(&self.retry, api, || async move {
            with_deadline(self.timeout, self.fetch::<T>(url, params))
                .await
                .unwrap_or_else(|elapsed| Err(MapsError::Timeout(elapsed.0)))
        })
        .await;

        match &result {
            Ok(_) => {
                tracing::debug!(api, elapsed = ?start.elapsed(), "Provider call succeeded");
                metrics::record_provider_call(api, "ok", start);
            }
            Err(e) => {
                tracing::warn!(api, kind = e.kind(), error = %e, "Provider call failed");
                metrics::record_provider_call(api, e.kind(), start);
            }
        }
        result
    }

    async fn fetch<T>(&self, url: &str, params: &[(&'static str, String)]) -> Result<T, MapsError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapsError::Http(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| MapsError::Decode(e.to_string()))
    }

    /// Strip the URL (it carries the API key) and separate timeouts.
    fn classify(&self, e: reqwest::Error) -> MapsError {
        if e.is_timeout() {
            return MapsError::Timeout(self.timeout);
        }
        MapsError::Transport(e.without_url())
    }
}

impl std::fmt::Debug for MapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.retry.max_attempts)
            .finish()
    }
}
