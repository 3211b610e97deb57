//! Radio Browser station directory client.
//!
//! Every endpoint answers with a JSON array of station objects. An empty
//! array is a valid answer and is reported as such; only non-200 statuses
//! and transport failures are errors.

mod client;
mod error;

pub use client::{DirectoryClient, DirectoryConfig, DirectoryLookup, parse_stations};
pub(crate) use client::CLIENT_USER_AGENT;
pub use error::DirectoryError;
