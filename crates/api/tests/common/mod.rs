//! Common test utilities for integration tests.
//!
//! Requests are driven through the real router with `oneshot`. Geolocation
//! lookups go through the real reqwest client to a fake service bound to an
//! ephemeral local port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, Path, Query},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use visitor_locator_api::{build_app, config::AppConfig, state::AppState};
use visitor_locator_core::{
    geolocation::IpInfoClient,
    store::{DocumentStore, MemoryDocumentStore, StoreError},
};

pub const TEST_TOKEN: &str = "test-token";

/// Test configuration pointing at the given fake geolocation service.
pub fn test_config(geolocation_base_url: &str) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("STORE_ENDPOINT", "memory://".to_string()),
        ("GEOLOCATION_BASE_URL", geolocation_base_url.to_string()),
        ("GEOLOCATION_TOKEN", TEST_TOKEN.to_string()),
        ("GEOLOCATION_TIMEOUT_SECS", "5".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Fake ipinfo-style service with canned answers per IP.
async fn fake_lookup(
    Path(ip): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("token").map(String::as_str) != Some(TEST_TOKEN) {
        return StatusCode::FORBIDDEN.into_response();
    }
    match ip.as_str() {
        "8.8.8.8" => Json(json!({
            "ip": "8.8.8.8",
            "city": "Mountain View",
            "region": "California",
            "country": "US",
        }))
        .into_response(),
        "1.2.3.4" => Json(json!({"city": "Paris", "region": "IDF", "country": "FR"})).into_response(),
        "9.9.9.9" => Json(json!({"city": "Berkeley", "region": "California"})).into_response(),
        "203.0.113.9" => Json(json!({"city": "Sydney", "region": "NSW", "country": "AU"})).into_response(),
        "10.0.0.1" => "not json".into_response(),
        _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

/// Spawn the fake geolocation service and return its base URL.
pub async fn spawn_geolocation_service() -> String {
    let app = Router::new().route("/{ip}/json", get(fake_lookup));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake geolocation service");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// An application wired to a memory store and the given lookup base URL.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDocumentStore>,
}

pub async fn create_test_app() -> TestApp {
    let base_url = spawn_geolocation_service().await;
    create_test_app_with(&base_url)
}

pub fn create_test_app_with(geolocation_base_url: &str) -> TestApp {
    let config = test_config(geolocation_base_url);
    let store = Arc::new(MemoryDocumentStore::new());
    let geolocation = IpInfoClient::new(
        config.geolocation_base_url.clone(),
        config.geolocation_token.clone(),
        Duration::from_secs(5),
    )
    .expect("Failed to build geolocation client");
    let state = AppState::new(store.clone(), Arc::new(geolocation));
    TestApp {
        router: build_app(state, &config),
        store,
    }
}

/// Store whose writes always fail.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn upsert(&self, _id: &str, _document: Value) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _id: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub async fn create_failing_store_app() -> Router {
    let base_url = spawn_geolocation_service().await;
    let config = test_config(&base_url);
    let geolocation = IpInfoClient::new(base_url, TEST_TOKEN, Duration::from_secs(5))
        .expect("Failed to build geolocation client");
    build_app(AppState::new(Arc::new(FailingStore), Arc::new(geolocation)), &config)
}

/// GET request with the given headers and no connection info.
pub fn get_request(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

/// GET request as if it arrived directly from `peer`.
pub fn get_request_from(uri: &str, peer: SocketAddr) -> Request<Body> {
    let mut request = get_request(uri, &[]);
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

/// Parse response body as JSON.
pub async fn parse_response_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
