//! Station record types.

use serde_json::{Map, Value};

use super::query::MAX_RESULTS;

/// Placeholder for fields the directory left out.
pub const UNKNOWN: &str = "Unknown";

/// The only codec browsers can be relied on to play.
pub const SUPPORTED_CODEC: &str = "MP3";

/// A station as returned by the upstream directory.
///
/// The typed fields are what the pipeline reasons about; `attributes`
/// keeps every name/value pair the directory sent, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub uuid: String,
    pub name: String,
    /// Stream URL
    pub url: String,
    pub homepage: String,
    pub country: String,
    pub codec: String,
    pub attributes: Vec<(String, String)>,
}

impl StationRecord {
    /// Build a record from a raw directory object.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            uuid: text("stationuuid").unwrap_or_default(),
            name: text("name").unwrap_or_else(|| UNKNOWN.to_string()),
            url: text("url").unwrap_or_else(|| UNKNOWN.to_string()),
            homepage: text("homepage").unwrap_or_else(|| UNKNOWN.to_string()),
            country: text("country").unwrap_or_else(|| UNKNOWN.to_string()),
            codec: text("codec").unwrap_or_else(|| UNKNOWN.to_string()),
            attributes: raw
                .iter()
                .map(|(k, v)| (k.clone(), display_value(v)))
                .collect(),
        }
    }

    /// Narrow to the fields shown in list views.
    pub fn summary(&self) -> StationSummary {
        StationSummary {
            name: self.name.clone(),
            homepage: self.homepage.clone(),
            uuid: self.uuid.clone(),
        }
    }
}

/// Render a JSON value for an attribute table.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// List-view projection of a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSummary {
    pub name: String,
    pub homepage: String,
    pub uuid: String,
}

/// A single resolved station with its raw attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationDetail {
    pub record: StationRecord,
    /// At most [`MAX_RESULTS`] name/value pairs.
    pub attributes: Vec<(String, String)>,
}

impl StationDetail {
    pub fn new(record: StationRecord) -> Self {
        let attributes = record.attributes.iter().take(MAX_RESULTS).cloned().collect();
        Self { record, attributes }
    }
}

/// Why a record is not presentable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unpresentable {
    #[error("codec {0:?} is not {SUPPORTED_CODEC}")]
    Codec(String),

    #[error("stream url {0:?} is not an allowed http(s) url")]
    InsecureUrl(String),
}

/// Format and transport rules a station must meet to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentability {
    /// Reject streams not served over `https://`.
    pub require_https: bool,
}

impl Default for Presentability {
    fn default() -> Self {
        Self {
            require_https: true,
        }
    }
}

impl Presentability {
    /// Check a record, reporting the first rule it breaks.
    pub fn check(&self, record: &StationRecord) -> Result<(), Unpresentable> {
        if record.codec != SUPPORTED_CODEC {
            return Err(Unpresentable::Codec(record.codec.clone()));
        }

        let https = record.url.starts_with("https://");
        if !https && (self.require_https || !record.url.starts_with("http://")) {
            return Err(Unpresentable::InsecureUrl(record.url.clone()));
        }

        Ok(())
    }

    pub fn admits(&self, record: &StationRecord) -> bool {
        self.check(record).is_ok()
    }
}
