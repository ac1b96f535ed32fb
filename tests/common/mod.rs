// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use training_calendar::config::Config;
use training_calendar::routes::create_router;
use training_calendar::AppState;

/// Access token the tests send and the mock Strava API expects.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-access-token";

/// Create a test app whose Strava client points at `strava_url`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(strava_url: &str) -> (axum::Router, Arc<AppState>) {
    create_app_with_config(Config {
        strava_api_url: strava_url.to_string(),
        strava_oauth_url: format!("{}/oauth", strava_url),
        ..Config::default()
    })
}

/// Create a test app from a fully specified config.
#[allow(dead_code)]
pub fn create_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Create a test app for routes that never reach Strava.
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    create_test_app("http://127.0.0.1:9")
}

/// Authenticated GET request.
#[allow(dead_code)]
pub fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TEST_TOKEN))
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
