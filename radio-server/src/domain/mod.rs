//! Domain types for the radio station front-end.
//!
//! Query inputs enforce their invariants at construction time, so the
//! resolution pipeline can trust them without re-validating.

mod error;
mod query;
mod station;

pub use error::ResolveError;
pub use query::{MAX_RESULTS, RandomLimit, SearchText, StationId, StationQuery};
pub use station::{
    Presentability, SUPPORTED_CODEC, StationDetail, StationRecord, StationSummary, UNKNOWN,
    Unpresentable,
};
