//! Web layer for the radio station browser.
//!
//! Server-rendered pages for a single station, a random sample, stations
//! near the caller and a name search.

mod routes;
mod state;
pub mod templates;

pub use routes::{AppError, caller_address, create_router};
pub use state::AppState;
pub use templates::*;
