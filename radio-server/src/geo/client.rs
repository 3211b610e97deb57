//! ip-api.com client.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::directory::CLIENT_USER_AGENT;
use crate::pipeline::Geolocator;

use super::error::GeoError;

/// Default base URL for ip-api.com (the free tier is http only).
const DEFAULT_BASE_URL: &str = "http://ip-api.com";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Minimal view of an ip-api.com answer.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    /// `success` or `fail`
    #[serde(default)]
    pub status: Option<String>,
    /// Failure reason when `status` is `fail`
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeoLocation {
    /// The city, if the lookup placed the address in one.
    pub fn into_city(self, address: &str) -> Result<String, GeoError> {
        if self.status.as_deref() == Some("fail") {
            return Err(GeoError::Unresolved {
                address: address.to_string(),
                reason: self.message.unwrap_or_else(|| "lookup failed".to_string()),
            });
        }

        self.city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GeoError::Unresolved {
                address: address.to_string(),
                reason: "response has no city".to_string(),
            })
    }
}

/// Configuration for the geolocation client.
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeoConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
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

impl Default for GeoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the ip-api.com geolocation service.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    pub fn new(config: GeoConfig) -> Result<Self, GeoError> {
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

    /// Look up an address.
    pub async fn locate(&self, address: &str) -> Result<GeoLocation, GeoError> {
        let url = lookup_url(&self.base_url, address)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GeoError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        parse_location(&body)
    }
}

#[async_trait]
impl Geolocator for GeoClient {
    async fn city(&self, address: &str) -> Result<String, GeoError> {
        self.locate(address).await?.into_city(address)
    }
}

/// Build the lookup URL; `address` must be a literal IP address.
fn lookup_url(base: &str, address: &str) -> Result<Url, GeoError> {
    let ip: IpAddr = address.trim().parse().map_err(|_| GeoError::Unresolved {
        address: address.to_string(),
        reason: "not an IP address".to_string(),
    })?;

    let mut url = Url::parse(base).map_err(|e| GeoError::Api {
        status: 0,
        message: format!("Invalid geolocation base URL {base:?}: {e}"),
    })?;

    url.path_segments_mut()
        .map_err(|_| GeoError::Api {
            status: 0,
            message: format!("Geolocation base URL cannot be a base: {base:?}"),
        })?
        .pop_if_empty()
        .extend(["json", ip.to_string().as_str()]);

    Ok(url)
}

/// Parse an ip-api.com response body.
pub fn parse_location(body: &str) -> Result<GeoLocation, GeoError> {
    serde_json::from_str(body).map_err(|e| GeoError::Json {
        message: e.to_string(),
    })
}
