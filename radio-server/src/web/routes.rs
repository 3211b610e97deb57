//! HTTP route handlers.

use std::net::SocketAddr;

use axum::{
    Router,
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::{ResolveError, StationDetail, StationQuery, StationSummary};
use crate::pipeline::Resolved;

use super::state::AppState;
use super::templates::*;

/// Header carrying the original client address when behind a proxy.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/station/:id", get(station_page))
        .route("/station/:id/", get(station_page))
        .route("/local", get(local_page))
        .route("/local/", get(local_page))
        .route("/explore", get(explore_page))
        .route("/explore/", get(explore_page))
        .route("/search", get(search_page))
        .route("/search/", get(search_page))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page() -> IndexTemplate {
    IndexTemplate
}

/// Single station player.
async fn station_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StationTemplate, AppError> {
    let query = StationQuery::by_uuid(&id)?;
    let detail = resolve_station(&state, &query).await?;
    Ok(StationTemplate::from_detail(detail))
}

/// Stations near the caller.
async fn local_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<LocalTemplate, AppError> {
    let peer = peer.map(|ConnectInfo(addr)| addr);
    let address = caller_address(&headers, peer).ok_or_else(|| {
        AppError(ResolveError::Generic(
            "no forwarded-for header and no peer address".to_string(),
        ))
    })?;

    let stations = resolve_list(&state, &StationQuery::by_location(address)).await?;
    Ok(LocalTemplate {
        stations: StationListItem::from_summaries(&stations),
    })
}

/// Query string for the explore page.
#[derive(Debug, Deserialize)]
pub struct ExploreParams {
    /// Sample size; clamped into range
    pub limit: Option<usize>,
}

/// A random sample of stations.
async fn explore_page(
    State(state): State<AppState>,
    Query(params): Query<ExploreParams>,
) -> Result<ExploreTemplate, AppError> {
    let stations = resolve_list(&state, &StationQuery::random(params.limit)).await?;
    Ok(ExploreTemplate {
        stations: StationListItem::from_summaries(&stations),
    })
}

/// Query string for the search page.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Stations by name.
async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<SearchTemplate, AppError> {
    let query = StationQuery::by_name(&params.q)?;
    let stations = resolve_list(&state, &query).await?;
    Ok(SearchTemplate {
        query: params.q,
        stations: StationListItem::from_summaries(&stations),
    })
}

/// The caller's address: the first `X-Forwarded-For` hop if present,
/// else the peer address of the connection.
pub fn caller_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

async fn resolve_station(
    state: &AppState,
    query: &StationQuery,
) -> Result<StationDetail, AppError> {
    match state.resolver.resolve(query).await? {
        Resolved::Station(detail) => Ok(detail),
        Resolved::List(_) => Err(AppError(ResolveError::Generic(format!(
            "{query:?} resolved to a list"
        )))),
    }
}

async fn resolve_list(
    state: &AppState,
    query: &StationQuery,
) -> Result<Vec<StationSummary>, AppError> {
    match state.resolver.resolve(query).await? {
        Resolved::List(stations) => Ok(stations),
        Resolved::Station(_) => Err(AppError(ResolveError::Generic(format!(
            "{query:?} resolved to a single station"
        )))),
    }
}

/// Application error type.
///
/// Renders as a short plain-text message; the detail goes to the log only.
#[derive(Debug)]
pub struct AppError(pub ResolveError);

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "request failed");
        } else {
            tracing::warn!(%status, error = %self.0, "request rejected");
        }

        (status, self.0.public_message()).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
