//! Radio Browser directory client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Map, Value};

use crate::domain::{RandomLimit, SearchText, StationId, StationRecord};
use crate::pipeline::StationDirectory;

use super::error::DirectoryError;

/// Default base URL for the Radio Browser API.
const DEFAULT_BASE_URL: &str = "https://de1.api.radio-browser.info";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// User agent sent upstream; Radio Browser asks clients to identify themselves.
pub(crate) const CLIENT_USER_AGENT: &str =
    concat!("radio-server/", env!("CARGO_PKG_VERSION"));

/// A directory request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryLookup {
    ByUuid(StationId),
    ByState(String),
    ByName(SearchText),
    Random(RandomLimit),
}

impl DirectoryLookup {
    /// Build the request URL against `base`.
    pub fn url(&self, base: &str) -> Result<Url, DirectoryError> {
        let mut url = Url::parse(base).map_err(|e| DirectoryError::Api {
            status: 0,
            message: format!("Invalid directory base URL {base:?}: {e}"),
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| DirectoryError::Api {
                status: 0,
                message: format!("Directory base URL cannot be a base: {base:?}"),
            })?;
            segments.pop_if_empty().extend(["json", "stations"]);

            match self {
                DirectoryLookup::ByUuid(id) => {
                    segments.extend(["byuuid", id.to_string().as_str()]);
                }
                DirectoryLookup::ByState(state) => {
                    segments.extend(["bystate", state.as_str()]);
                }
                DirectoryLookup::ByName(text) => {
                    segments.extend(["byname", text.as_str()]);
                }
                DirectoryLookup::Random(_) => {}
            }
        }

        if let DirectoryLookup::Random(limit) = self {
            url.query_pairs_mut()
                .append_pair("order", "random")
                .append_pair("limit", &limit.get().to_string());
        }

        Ok(url)
    }
}

/// Configuration for the directory client.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectoryConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a different mirror).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Radio Browser station directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a new directory client.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Run a lookup and return the stations in upstream order.
    pub async fn fetch(&self, lookup: &DirectoryLookup) -> Result<Vec<StationRecord>, DirectoryError> {
        let url = lookup.url(&self.base_url)?;
        tracing::debug!(%url, "querying station directory");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        parse_stations(&body)
    }
}

#[async_trait]
impl StationDirectory for DirectoryClient {
    async fn stations(&self, lookup: DirectoryLookup) -> Result<Vec<StationRecord>, DirectoryError> {
        self.fetch(&lookup).await
    }
}

/// Parse a directory response body: a JSON array of station objects.
pub fn parse_stations(body: &str) -> Result<Vec<StationRecord>, DirectoryError> {
    let raw: Vec<Map<String, Value>> =
        serde_json::from_str(body).map_err(|e| DirectoryError::Json {
            message: e.to_string(),
        })?;

    Ok(raw.iter().map(StationRecord::from_raw).collect())
}
