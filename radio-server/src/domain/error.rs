//! Station resolution error types.
//!
//! Every failure of the resolution pipeline collapses into one of these
//! variants. The detail string is for server-side logs only; callers see
//! [`ResolveError::public_message`].

/// Failure of a station resolution request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Station identifier is not a well-formed UUID
    #[error("invalid station identifier: {0}")]
    InvalidIdentifier(String),

    /// Search text contains characters outside `[A-Za-z0-9 ]`
    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    /// An upstream service failed or answered with a non-success status
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The directory answered with an empty collection
    #[error("no results")]
    NoResults,

    /// Free text was rejected by the content policy
    #[error("content rejected: {0}")]
    ContentRejected(String),

    /// Station stream is not MP3 or not served over https
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Anything else
    #[error("generic error: {0}")]
    Generic(String),
}

impl ResolveError {
    /// Whether the failure is attributable to the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResolveError::InvalidIdentifier(_)
                | ResolveError::InvalidQuery(_)
                | ResolveError::NoResults
                | ResolveError::ContentRejected(_)
        )
    }

    /// The short literal shown to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            ResolveError::InvalidIdentifier(_) => "Invalid station UUID.",
            ResolveError::InvalidQuery(_) => "Input must be alphanumerical.",
            ResolveError::UpstreamUnavailable(_) => "Data could not be fetched.",
            ResolveError::NoResults => "No results.",
            ResolveError::ContentRejected(_) => "Unsupported content.",
            ResolveError::UnsupportedFormat(_) => "Unsupported music type.",
            ResolveError::Generic(_) => "Generic error.",
        }
    }
}
