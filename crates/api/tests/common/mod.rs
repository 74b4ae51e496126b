#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use sharehub_api::config::ServerConfig;
use sharehub_api::router::build_app_router;
use sharehub_api::state::AppState;
use sharehub_core::listing::{Category, Listing, ListingStatus};
use sharehub_db::store::MemoryMarketStore;

/// Build a test `ServerConfig` with safe defaults and permissive CORS.
pub fn test_config(identity_fallback: bool) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        identity_fallback,
    }
}

/// Build the full application router over an in-memory store, with the
/// identity fallback disabled (the production default).
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store: Arc<MemoryMarketStore>) -> Router {
    let config = test_config(false);
    build_app_router(AppState::new(store, config.clone()), &config)
}

/// Same as [`build_test_app`] but with the self-asserted identity fallback
/// enabled.
pub fn build_test_app_with_fallback(store: Arc<MemoryMarketStore>) -> Router {
    let config = test_config(true);
    build_app_router(AppState::new(store, config.clone()), &config)
}

/// Mint a `Bearer ...` header value. The signature uses a throwaway secret;
/// the server reads the payload without verifying it.
pub fn bearer(sub: &str, name: &str) -> String {
    let token = encode(
        &Header::default(),
        &serde_json::json!({ "sub": sub, "name": name, "exp": 4_102_444_800i64 }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("token encoding should succeed");
    format!("Bearer {token}")
}

/// An available listing created by `owner`, expiring 30 days out.
pub fn available_listing(id: &str, owner: &str) -> Listing {
    let now = Utc::now();
    Listing {
        id: id.to_string(),
        title: format!("Item {id}"),
        description: "A shareable item".to_string(),
        category: Category::Other,
        campus: "Main Campus".to_string(),
        image_url: None,
        created_by: owner.to_string(),
        created_by_name: format!("{owner} Name"),
        created_at: now,
        expires_at: now + Duration::days(30),
        status: ListingStatus::Available,
        claimed_by: None,
        claimed_by_name: None,
        claimed_at: None,
    }
}

/// A listing already claimed by `claimant`.
pub fn claimed_listing(id: &str, owner: &str, claimant: &str) -> Listing {
    let mut listing = available_listing(id, owner);
    listing.status = ListingStatus::Claimed;
    listing.claimed_by = Some(claimant.to_string());
    listing.claimed_by_name = Some(format!("{claimant} Name"));
    listing.claimed_at = Some(Utc::now());
    listing
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a request with an optional bearer header and optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
