//! Directory API error types.

use crate::domain::ResolveError;

/// Errors that can occur when interacting with the station directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<DirectoryError> for ResolveError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Http(_) | DirectoryError::Api { .. } => {
                ResolveError::UpstreamUnavailable(format!("station directory: {e}"))
            }
            DirectoryError::Json { .. } => {
                ResolveError::Generic(format!("station directory: {e}"))
            }
        }
    }
}
