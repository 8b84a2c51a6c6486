use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::trip::{SortBy, Trip};
use crate::retry::Retryable;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Failure of a single round trip to the trip provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Trip provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Trip provider unreachable: {0}")]
    Network(String),

    #[error("Malformed trip provider response: {0}")]
    Decode(String),

    #[error("Invalid trip provider request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        "FETCH_ERROR"
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Retryable for FetchError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Network(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// One outbound search against the external provider. Implementations must
/// not retry; that is the caller's job.
#[async_trait]
pub trait TripProvider: Send + Sync {
    async fn fetch_trips(
        &self,
        origin: &str,
        destination: &str,
        sort: SortBy,
    ) -> Result<Vec<Trip>, FetchError>;
}

#[derive(Clone)]
pub struct HttpTripProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpTripProvider {
    /// Creates a provider using a shared HTTP client (for connection pooling).
    ///
    /// The endpoint and credential are checked here so a misconfigured
    /// provider is rejected at startup rather than on the first search.
    pub fn with_shared_client(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidRequest(format!("{base_url}: {e}")))?;

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FetchError::InvalidRequest(
                "no API key configured".to_string(),
            ));
        }

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn build_url(&self, origin: &str, destination: &str, sort: SortBy) -> Url {
        let mut url = self.base_url.clone();

        url.query_pairs_mut()
            .append_pair("origin", origin)
            .append_pair("destination", destination)
            .append_pair("sort_by", sort.as_str());

        url
    }
}

#[async_trait]
impl TripProvider for HttpTripProvider {
    async fn fetch_trips(
        &self,
        origin: &str,
        destination: &str,
        sort: SortBy,
    ) -> Result<Vec<Trip>, FetchError> {
        let url = self.build_url(origin, destination, sort);

        debug!("Fetching trips {} -> {} (sort: {})", origin, destination, sort);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let trips: Vec<Trip> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(
            "Provider returned {} trips for {} -> {}",
            trips.len(),
            origin,
            destination
        );
        Ok(trips)
    }
}
