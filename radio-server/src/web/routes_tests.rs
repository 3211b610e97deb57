//! Router tests against in-memory upstreams.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use tower::ServiceExt;

use super::*;
use crate::directory::DirectoryLookup;
use crate::domain::{Presentability, RandomLimit};
use crate::pipeline::Resolver;
use crate::pipeline::fakes::*;
use crate::policy::{ContentPolicy, ProfanityLexicon};

struct App {
    router: Router,
    directory: Arc<FakeDirectory>,
    geo: Arc<FakeGeo>,
    translator: Arc<FakeTranslator>,
}

fn app(reply: Reply) -> App {
    let directory = FakeDirectory::new(reply);
    let geo = FakeGeo::new(Some("Valparaiso"));
    let translator = FakeTranslator::new();
    let policy = ContentPolicy::new(
        Arc::new(ProfanityLexicon::from_words(["shit"])),
        translator.clone(),
    );
    let resolver = Resolver::new(
        directory.clone(),
        geo.clone(),
        policy,
        Presentability::default(),
    );

    App {
        router: create_router(AppState::new(resolver), "static"),
        directory,
        geo,
        translator,
    }
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let app = app(Reply::Status(500));
    let (status, body) = get(app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn index_renders() {
    let app = app(Reply::Status(500));
    let (status, body) = get(app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
}

// ============================================================================
// /station/:id
// ============================================================================

#[tokio::test]
async fn station_page_shows_station() {
    let mut record = station(UUID, "Radio Cooperativa", "MP3", "https://stream.example/live");
    record.country = "Chile".to_string();
    let app = app(Reply::Stations(vec![record]));

    let (status, body) = get(app.router, &format!("/station/{UUID}/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Radio Cooperativa"));
    assert!(body.contains("Chile"));
    assert!(body.contains("stream.example"));
    assert!(body.contains(&format!("{UUID}.example")));
}

#[tokio::test]
async fn station_page_without_trailing_slash() {
    let app = app(Reply::Stations(vec![mp3(UUID)]));
    let (status, _) = get(app.router, &format!("/station/{UUID}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn station_page_unsupported_codec() {
    let app = app(Reply::Stations(vec![station(UUID, "Jazz", "OGG", "https://x")]));
    let (status, body) = get(app.router, &format!("/station/{UUID}/")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Unsupported music type.");
}

#[tokio::test]
async fn station_page_invalid_uuid_makes_no_calls() {
    let app = app(Reply::Stations(vec![mp3(UUID)]));
    let (status, body) = get(app.router, "/station/not-a-uuid/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid station UUID.");
    assert!(app.directory.lookups().is_empty());
    assert_eq!(app.translator.calls(), 0);
}

#[tokio::test]
async fn station_page_no_results() {
    let app = app(Reply::Stations(vec![]));
    let (status, body) = get(app.router, &format!("/station/{UUID}/")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No results.");
}

#[tokio::test]
async fn station_page_profane_name() {
    let app = app(Reply::Stations(vec![station(UUID, "merde", "MP3", "https://x")]));
    let (status, body) = get(app.router, &format!("/station/{UUID}/")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Unsupported content.");
}

// ============================================================================
// /search
// ============================================================================

#[tokio::test]
async fn search_no_matches() {
    let app = app(Reply::Stations(vec![]));
    let (status, body) = get(app.router, "/search/?q=rock").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No results.");
}

#[tokio::test]
async fn search_lists_matches() {
    let app = app(Reply::Stations(vec![
        station("a", "Rock Antenne", "MP3", "https://a"),
        station("b", "Rock AAC", "AAC", "https://b"),
    ]));
    let (status, body) = get(app.router, "/search/?q=rock%20antenne").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rock Antenne"));
    assert!(!body.contains("Rock AAC"));
    assert!(body.contains("rock antenne"));
}

#[tokio::test]
async fn search_invalid_query_makes_no_calls() {
    let app = app(Reply::Stations(vec![mp3("a")]));
    let (status, body) = get(app.router, "/search/?q=rock%21").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Input must be alphanumerical.");
    assert_eq!(app.translator.calls(), 0);
    assert!(app.directory.lookups().is_empty());
}

#[tokio::test]
async fn search_missing_query() {
    let app = app(Reply::Stations(vec![mp3("a")]));
    let (status, body) = get(app.router, "/search/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Input must be alphanumerical.");
}

#[tokio::test]
async fn search_profane_query() {
    let app = app(Reply::Stations(vec![mp3("a")]));
    let (status, body) = get(app.router, "/search/?q=merde").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Unsupported content.");
    assert!(app.directory.lookups().is_empty());
}

// ============================================================================
// /explore
// ============================================================================

#[tokio::test]
async fn explore_upstream_down() {
    let app = app(Reply::Status(503));
    let (status, body) = get(app.router, "/explore/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Data could not be fetched.");
}

#[tokio::test]
async fn explore_clamps_limit() {
    let app = app(Reply::Stations(vec![mp3("a")]));
    let (status, _) = get(app.router, "/explore/?limit=500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.directory.lookups(),
        vec![DirectoryLookup::Random(RandomLimit::clamped(500))]
    );
}

#[tokio::test]
async fn explore_lists_only_playable() {
    let app = app(Reply::Stations(vec![
        station("a", "Playable", "MP3", "https://a"),
        station("b", "Insecure", "MP3", "http://b"),
    ]));
    let (status, body) = get(app.router, "/explore/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Playable"));
    assert!(!body.contains("Insecure"));
}

// ============================================================================
// /local
// ============================================================================

#[tokio::test]
async fn local_uses_forwarded_for() {
    let app = app(Reply::Stations(vec![mp3("a")]));
    let request = Request::get("/local/")
        .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.geo.addresses.lock().unwrap().clone(),
        vec!["203.0.113.7".to_string()]
    );
    assert_eq!(
        app.directory.lookups(),
        vec![DirectoryLookup::ByState("Valparaiso".into())]
    );
}

#[tokio::test]
async fn local_uses_peer_address() {
    let app = app(Reply::Stations(vec![mp3("a")]));
    let mut request = Request::get("/local/").body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([198, 51, 100, 4], 50000))));

    let (status, _) = send(app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.geo.addresses.lock().unwrap().clone(),
        vec!["198.51.100.4".to_string()]
    );
}

#[tokio::test]
async fn local_without_any_address() {
    let app = app(Reply::Stations(vec![mp3("a")]));
    let (status, body) = get(app.router, "/local/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Generic error.");
}

// ============================================================================
// caller_address
// ============================================================================

#[test]
fn caller_address_prefers_first_forwarded_hop() {
    let mut headers = HeaderMap::new();
    headers.insert(FORWARDED_FOR, HeaderValue::from_static(" 203.0.113.7 ,10.0.0.1"));
    let peer = SocketAddr::from(([127, 0, 0, 1], 1234));

    assert_eq!(
        caller_address(&headers, Some(peer)).as_deref(),
        Some("203.0.113.7")
    );
}

#[test]
fn caller_address_falls_back_to_peer() {
    let peer = SocketAddr::from(([127, 0, 0, 1], 1234));
    assert_eq!(
        caller_address(&HeaderMap::new(), Some(peer)).as_deref(),
        Some("127.0.0.1")
    );

    let mut headers = HeaderMap::new();
    headers.insert(FORWARDED_FOR, HeaderValue::from_static(" , 10.0.0.1"));
    assert_eq!(
        caller_address(&headers, Some(peer)).as_deref(),
        Some("127.0.0.1")
    );
}

#[test]
fn caller_address_none_without_sources() {
    assert_eq!(caller_address(&HeaderMap::new(), None), None);
}
