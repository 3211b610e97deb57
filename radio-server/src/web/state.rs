//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::Resolver;

/// Shared application state.
///
/// Read-only for the life of the process.
#[derive(Clone)]
pub struct AppState {
    /// Station resolution pipeline
    pub resolver: Arc<Resolver>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
