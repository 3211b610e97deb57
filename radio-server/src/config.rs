//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::directory::DirectoryConfig;
use crate::domain::Presentability;
use crate::geo::GeoConfig;
use crate::policy::TranslatorConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default outbound request timeout (seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Error for an environment variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Everything `main` needs to build the app.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub directory: DirectoryConfig,
    pub geo: GeoConfig,
    pub translator: TranslatorConfig,
    /// Word list file; the bundled list is used when unset.
    pub wordlist: Option<PathBuf>,
    pub static_dir: String,
    pub presentability: Presentability,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_raw = get("RADIO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError {
                var: "RADIO_BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let timeout_secs = match get("RADIO_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError {
                        var: "RADIO_HTTP_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ConfigError {
                        var: "RADIO_HTTP_TIMEOUT_SECS",
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let require_https = match get("RADIO_REQUIRE_HTTPS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError {
                var: "RADIO_REQUIRE_HTTPS",
                value: raw.clone(),
                reason: "expected true or false".to_string(),
            })?,
            None => true,
        };

        let mut directory = DirectoryConfig::new().with_timeout(timeout_secs);
        if let Some(url) = get("RADIO_DIRECTORY_URL") {
            directory = directory.with_base_url(url);
        }

        let mut geo = GeoConfig::new().with_timeout(timeout_secs);
        if let Some(url) = get("RADIO_GEO_URL") {
            geo = geo.with_base_url(url);
        }

        let mut translator = TranslatorConfig::new().with_timeout(timeout_secs);
        if let Some(url) = get("RADIO_TRANSLATE_URL") {
            translator = translator.with_base_url(url);
        }
        if let Some(lang) = get("RADIO_TARGET_LANG") {
            translator = translator.with_target_lang(lang);
        }

        Ok(Self {
            bind_addr,
            directory,
            geo,
            translator,
            wordlist: get("RADIO_PROFANITY_WORDLIST").map(PathBuf::from),
            static_dir: get("RADIO_STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            presentability: Presentability { require_https },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
