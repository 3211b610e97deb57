//! Station resolution and filtering pipeline.
//!
//! Takes a [`StationQuery`](crate::domain::StationQuery), fetches candidates
//! from the directory, applies the content policy and the presentability
//! rules, and returns at most [`MAX_RESULTS`](crate::domain::MAX_RESULTS)
//! stations in upstream order.

mod filter;
mod resolver;

#[cfg(test)]
pub(crate) mod fakes;

pub use filter::presentable_summaries;
pub use resolver::{Geolocator, Resolved, Resolver, StationDirectory};
