//! Integration tests for the HTTP trip provider against a local server.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tripfinder::cache::{CacheStore, MemoryCache};
use tripfinder::clients::{FetchError, HttpTripProvider, TripProvider};
use tripfinder::models::SortBy;
use tripfinder::retry::{RetryPolicy, Retryable};
use tripfinder::services::{CachedTripLookup, TripLookup};

#[derive(Clone, Default)]
struct Upstream {
    calls: Arc<AtomicU32>,
    fail_first: u32,
    body: Option<&'static str>,
    seen: Arc<Mutex<Vec<(Option<String>, HashMap<String, String>)>>>,
}

async fn trips(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let call = upstream.calls.fetch_add(1, Ordering::SeqCst) + 1;
    let key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    upstream.seen.lock().unwrap().push((key, params.clone()));

    if call <= upstream.fail_first {
        return (StatusCode::SERVICE_UNAVAILABLE, "busy").into_response();
    }

    if let Some(body) = upstream.body {
        return body.into_response();
    }

    Json(json!([{
        "id": "a1",
        "origin": params.get("origin"),
        "destination": params.get("destination"),
        "cost": 850,
        "duration": 1140,
        "type": "flight",
        "display_name": "Atlanta to Beijing"
    }]))
    .into_response()
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let app = Router::new()
        .route("/trips", get(trips))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/trips")
}

fn provider(base_url: &str, api_key: &str) -> HttpTripProvider {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    HttpTripProvider::with_shared_client(client, base_url, api_key).unwrap()
}

#[tokio::test]
async fn sends_key_and_route_and_decodes_trips() {
    let upstream = Upstream::default();
    let base_url = spawn_upstream(upstream.clone()).await;

    let trips = provider(&base_url, "secret")
        .fetch_trips("ATL", "PEK", SortBy::Cheapest)
        .await
        .unwrap();

    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].id, "a1");
    assert_eq!(trips[0].origin, "ATL");
    assert_eq!(trips[0].destination, "PEK");
    assert_eq!(trips[0].trip_type, "flight");

    let seen = upstream.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (key, params) = &seen[0];
    assert_eq!(key.as_deref(), Some("secret"));
    assert_eq!(params.get("origin").map(String::as_str), Some("ATL"));
    assert_eq!(params.get("destination").map(String::as_str), Some("PEK"));
    assert_eq!(params.get("sort_by").map(String::as_str), Some("cheapest"));
}

#[tokio::test]
async fn non_success_status_is_retryable() {
    let upstream = Upstream {
        fail_first: u32::MAX,
        ..Upstream::default()
    };
    let base_url = spawn_upstream(upstream).await;

    let err = provider(&base_url, "secret")
        .fetch_trips("ATL", "PEK", SortBy::Fastest)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.kind(), "FETCH_ERROR");
    assert!(err.is_retryable());
    assert_eq!(err.to_string(), "Trip provider returned 503: busy");
}

#[tokio::test]
async fn malformed_body_is_a_permanent_failure() {
    let upstream = Upstream {
        body: Some(r#"{"error":"not a list"}"#),
        ..Upstream::default()
    };
    let base_url = spawn_upstream(upstream).await;

    let err = provider(&base_url, "secret")
        .fetch_trips("ATL", "PEK", SortBy::Fastest)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn refused_connection_is_a_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(&format!("http://{addr}/trips"), "secret")
        .fetch_trips("ATL", "PEK", SortBy::Fastest)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn missing_api_key_is_rejected_before_any_search() {
    let upstream = Upstream::default();
    let base_url = spawn_upstream(upstream.clone()).await;

    let err = HttpTripProvider::with_shared_client(reqwest::Client::new(), &base_url, "")
        .err()
        .unwrap();

    assert!(matches!(err, FetchError::InvalidRequest(_)));
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn lookup_retries_through_outage_and_caches() {
    let upstream = Upstream {
        fail_first: 2,
        ..Upstream::default()
    };
    let base_url = spawn_upstream(upstream.clone()).await;

    let cache = Arc::new(MemoryCache::new());
    let lookup = CachedTripLookup::new(
        Arc::new(provider(&base_url, "secret")),
        cache.clone(),
        RetryPolicy::new(3, Duration::from_millis(10)).unwrap(),
        300,
    );

    let first = lookup.search("atl", "pek", SortBy::Fastest).await.unwrap();
    let second = lookup.search("ATL", "PEK", SortBy::Fastest).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].id, "a1");
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);
    assert!(cache.get("trips:ATL:PEK").await.unwrap().is_some());
}

#[tokio::test]
async fn lookup_gives_up_after_max_attempts() {
    let upstream = Upstream {
        fail_first: u32::MAX,
        ..Upstream::default()
    };
    let base_url = spawn_upstream(upstream.clone()).await;

    let cache = Arc::new(MemoryCache::new());
    let lookup = CachedTripLookup::new(
        Arc::new(provider(&base_url, "secret")),
        cache.clone(),
        RetryPolicy::new(3, Duration::from_millis(10)).unwrap(),
        300,
    );

    let err = lookup.find("ATL", "PEK").await.unwrap_err();

    assert_eq!(err.kind(), "FETCH_RETRY_FAILED");
    assert_eq!(
        err.to_string(),
        "Trip search failed after 3 attempts: Trip provider returned 503: busy"
    );
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);
    assert!(cache.is_empty().await);
}
