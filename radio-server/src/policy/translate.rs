//! Machine translation client.
//!
//! Talks to the public Google Translate `gtx` endpoint, which needs no
//! credentials and detects the source language itself.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::directory::CLIENT_USER_AGENT;
use crate::domain::ResolveError;

/// Default base URL for the translation endpoint.
const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Default target language.
const DEFAULT_TARGET_LANG: &str = "en";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Errors from the translation service.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response did not have the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<TranslateError> for ResolveError {
    fn from(e: TranslateError) -> Self {
        ResolveError::UpstreamUnavailable(format!("translation: {e}"))
    }
}

/// Something that can translate text into a fixed reference language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

/// Configuration for the translation client.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Base URL for the API
    pub base_url: String,
    /// ISO 639-1 code of the reference language
    pub target_lang: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the reference language.
    pub fn with_target_lang(mut self, lang: impl Into<String>) -> Self {
        self.target_lang = lang.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Google Translate client.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    http: reqwest::Client,
    base_url: String,
    target_lang: String,
}

impl GoogleTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslateError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            target_lang: config.target_lang,
        })
    }

    fn request_url(&self, text: &str) -> Result<Url, TranslateError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| TranslateError::Api {
            status: 0,
            message: format!("Invalid translation base URL {:?}: {e}", self.base_url),
        })?;

        url.path_segments_mut()
            .map_err(|_| TranslateError::Api {
                status: 0,
                message: format!("Translation base URL cannot be a base: {:?}", self.base_url),
            })?
            .pop_if_empty()
            .extend(["translate_a", "single"]);

        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "auto")
            .append_pair("tl", &self.target_lang)
            .append_pair("dt", "t")
            .append_pair("q", text);

        Ok(url)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let url = self.request_url(text)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        parse_translation(&body)
    }
}

/// Extract the translated text from a `gtx` response.
///
/// The body is a nested array whose first element lists sentence chunks,
/// each chunk starting with its translation:
/// `[[["Hello world","Hallo Welt",null,null,10]],null,"de"]`.
pub fn parse_translation(body: &str) -> Result<String, TranslateError> {
    let value: Value = serde_json::from_str(body).map_err(|e| TranslateError::Json {
        message: e.to_string(),
    })?;

    let chunks = match value.get(0) {
        Some(Value::Array(chunks)) => chunks,
        Some(Value::Null) => return Ok(String::new()),
        _ => {
            return Err(TranslateError::Json {
                message: "missing sentence list".to_string(),
            });
        }
    };

    Ok(chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect())
}
