//! Geolocation error types.

use crate::domain::ResolveError;

/// Errors from the geolocation service.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The lookup answered but could not place the address
    #[error("no city for {address}: {reason}")]
    Unresolved { address: String, reason: String },
}

impl From<GeoError> for ResolveError {
    fn from(e: GeoError) -> Self {
        match e {
            GeoError::Json { .. } => ResolveError::Generic(format!("geolocation: {e}")),
            _ => ResolveError::UpstreamUnavailable(format!("geolocation: {e}")),
        }
    }
}
