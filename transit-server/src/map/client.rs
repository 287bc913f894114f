//! Map API HTTP client.

use chrono::Utc;

use super::convert::convert;
use super::error::MapError;
use super::model::RawNetworkModel;
use super::types::MapResponse;

/// Path of the combined stations-and-routes document, relative to the
/// map's base URL. Dimension 0 is the overworld.
const MAP_DOCUMENT_PATH: &str = "/mtr/api/map/stations-and-routes?dimension=0";

/// Configuration for the map client.
#[derive(Debug, Clone)]
pub struct MapClientConfig {
    /// Base URL of the online map, e.g. `https://map.example.net`.
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapClientConfig {
    /// Create a config for the given map URL.
    ///
    /// People paste the map's browser URL; a trailing `/index.html` or
    /// `/` is stripped so either form works.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url: String = base_url.into();
        if let Some(stripped) = base_url.strip_suffix("/index.html") {
            base_url = stripped.to_string();
        }
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// A source of network descriptions.
///
/// This abstraction lets the snapshot layer be driven by the real map
/// API in production and canned or failing sources in tests.
pub trait MapSource: Send + Sync {
    /// Fetch and parse the current network description.
    fn fetch(&self) -> impl Future<Output = Result<RawNetworkModel, MapError>> + Send;
}

/// HTTP client for the online map.
#[derive(Debug, Clone)]
pub struct MapClient {
    http: reqwest::Client,
    base_url: String,
}

impl MapClient {
    /// Create a new map client.
    pub fn new(config: MapClientConfig) -> Result<Self, MapError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    async fn fetch_inner(&self) -> Result<RawNetworkModel, MapError> {
        let url = format!("{}{}", self.base_url, MAP_DOCUMENT_PATH);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: MapResponse = serde_json::from_str(&body).map_err(|e| MapError::Json {
            message: e.to_string(),
        })?;

        Ok(convert(parsed.data, Utc::now())?)
    }
}

impl MapSource for MapClient {
    fn fetch(&self) -> impl Future<Output = Result<RawNetworkModel, MapError>> + Send {
        self.fetch_inner()
    }
}
