//! Integration Tests for the Internet Archive Endpoints
//!
//! Runs the router against a local stand-in for the Internet Archive and
//! checks which requests reach it, what gets cached, and how upstream
//! failures surface.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use analock::cache::keys::{BOOK_METADATA_RESOURCE, BOOK_SEARCH_RESOURCE};
use analock::services::{AppCache, InternetArchiveClient};
use analock::storage::MemoryStorage;
use analock::{api::create_router, AppState};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Stub Archive ==

#[derive(Default)]
struct Upstream {
    requests: AtomicUsize,
    failures_left: AtomicUsize,
    last_query: Mutex<Vec<(String, String)>>,
}

impl Upstream {
    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn fail_next(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    /// Counts the request and reports whether it should fail.
    fn take_failure(&self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

async fn stub_metadata(
    State(upstream): State<Arc<Upstream>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if upstream.take_failure() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(json!({
        "files": [{"name": format!("{}.epub", id), "format": "EPUB"}],
        "metadata": {"identifier": id, "mediatype": "texts", "title": "Moby Dick"}
    }))
    .into_response()
}

async fn stub_search(
    State(upstream): State<Arc<Upstream>>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    *upstream.last_query.lock().unwrap() = params;
    if upstream.take_failure() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(json!({
        "responseHeader": {"status": 0},
        "response": {
            "numFound": 1,
            "start": 0,
            "docs": [{"identifier": "mobydick00melv", "title": "Moby Dick", "creator": "Melville"}]
        }
    }))
    .into_response()
}

/// Serves the stub on an ephemeral port and returns its base URL.
async fn spawn_upstream(upstream: Arc<Upstream>) -> String {
    let app = Router::new()
        .route("/metadata/:id", get(stub_metadata))
        .route("/advancedsearch.php", get(stub_search))
        .with_state(upstream);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// == Helper Functions ==

fn state_for(base_url: &str, max_retries: u32) -> AppState {
    let client =
        InternetArchiveClient::new(base_url).with_retries(max_retries, Duration::from_millis(1));
    AppState::new(
        Arc::new(MemoryStorage::new()),
        AppCache::new(Duration::from_secs(300)),
        client,
    )
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const SEARCH_URI: &str = "/api/v1/internetArchive/books/search?collection=gutenberg&language=english&subject=fiction&rows=5";

// == Metadata Tests ==

#[tokio::test]
async fn test_book_metadata_is_cached() {
    let upstream = Arc::new(Upstream::default());
    let state = state_for(&spawn_upstream(Arc::clone(&upstream)).await, 0);
    let app = create_router(state.clone());

    let (status, first) = get_json(&app, "/api/v1/internetArchive/books/mobydick00melv/metadata").await;
    let (_, second) = get_json(&app, "/api/v1/internetArchive/books/mobydick00melv/metadata").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["metadata"]["identifier"], "mobydick00melv");
    assert_eq!(first["files"][0]["format"], "EPUB");
    assert_eq!(first, second);
    assert_eq!(upstream.requests(), 1);
    assert!(
        state
            .cache
            .contains(BOOK_METADATA_RESOURCE, "book-mobydick00melv")
            .await
    );
}

#[tokio::test]
async fn test_upstream_failure_is_not_cached() {
    let upstream = Arc::new(Upstream::default());
    let state = state_for(&spawn_upstream(Arc::clone(&upstream)).await, 0);
    let app = create_router(state.clone());
    upstream.fail_next(1);

    let (status, json) = get_json(&app, "/api/v1/internetArchive/books/ulysses/metadata").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("503"));
    assert!(state.cache.is_empty().await);

    let (status, json) = get_json(&app, "/api/v1/internetArchive/books/ulysses/metadata").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metadata"]["identifier"], "ulysses");
    assert_eq!(upstream.requests(), 2);
    assert_eq!(state.cache.stats().await.loader_failures, 1);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let upstream = Arc::new(Upstream::default());
    let state = state_for(&spawn_upstream(Arc::clone(&upstream)).await, 1);
    let app = create_router(state);
    upstream.fail_next(1);

    let (status, _) = get_json(&app, "/api/v1/internetArchive/books/ulysses/metadata").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(upstream.requests(), 2);
}

#[tokio::test]
async fn test_unreachable_archive_is_bad_gateway() {
    // Nothing listens on port 1
    let state = state_for("http://127.0.0.1:1", 0);
    let app = create_router(state.clone());

    let (status, json) = get_json(&app, "/api/v1/internetArchive/books/ulysses/metadata").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].is_string());
    assert!(state.cache.is_empty().await);
}

// == Search Tests ==

#[tokio::test]
async fn test_book_search_is_cached() {
    let upstream = Arc::new(Upstream::default());
    let state = state_for(&spawn_upstream(Arc::clone(&upstream)).await, 0);
    let app = create_router(state.clone());

    let (status, json) = get_json(&app, SEARCH_URI).await;
    get_json(&app, SEARCH_URI).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"]["numFound"], 1);
    assert_eq!(json["response"]["docs"][0]["identifier"], "mobydick00melv");
    assert_eq!(upstream.requests(), 1);
    assert!(
        state
            .cache
            .contains(
                BOOK_SEARCH_RESOURCE,
                "collectiongutenberg-languageenglish-subjectfiction-rows5"
            )
            .await
    );
}

#[tokio::test]
async fn test_book_search_query_forwarded() {
    let upstream = Arc::new(Upstream::default());
    let app = create_router(state_for(&spawn_upstream(Arc::clone(&upstream)).await, 0));

    get_json(&app, SEARCH_URI).await;

    let params = upstream.last_query.lock().unwrap().clone();
    let value = |name: &str| {
        params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };
    assert_eq!(
        value("q").as_deref(),
        Some("collection:gutenberg AND language:english AND subject:fiction AND mediatype:texts")
    );
    assert_eq!(value("rows").as_deref(), Some("5"));
    assert_eq!(value("output").as_deref(), Some("json"));
    assert_eq!(params.iter().filter(|(key, _)| key == "fl[]").count(), 3);
}

#[tokio::test]
async fn test_different_searches_are_cached_apart() {
    let upstream = Arc::new(Upstream::default());
    let state = state_for(&spawn_upstream(Arc::clone(&upstream)).await, 0);
    let app = create_router(state.clone());

    get_json(&app, SEARCH_URI).await;
    get_json(
        &app,
        "/api/v1/internetArchive/books/search?collection=gutenberg&language=english&subject=fiction&rows=10",
    )
    .await;

    assert_eq!(upstream.requests(), 2);
    assert_eq!(state.cache.len().await, 2);
}
