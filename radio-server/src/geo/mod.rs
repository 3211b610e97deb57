//! IP geolocation client.
//!
//! Resolves a caller address to a city via ip-api.com. Used only to pick
//! a region for the directory's `bystate` lookup.

mod client;
mod error;

pub use client::{GeoClient, GeoConfig, GeoLocation, parse_location};
pub use error::GeoError;
