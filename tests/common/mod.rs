// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use athlete_travel::config::Config;
use athlete_travel::routes::create_router;
use athlete_travel::AppState;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app with the sample catalog loaded.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Create a test app with an empty store.
#[allow(dead_code)]
pub fn create_empty_test_app() -> (Router, Arc<AppState>) {
    let config = Config {
        seed_sample_data: false,
        ..Config::test_default()
    };
    create_test_app_with_config(config)
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build test state"));
    (create_router(state.clone()), state)
}

/// Send a request with an optional JSON body.
#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON (`Value::Null` for an empty body).
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Send a request and assert on the status; returns the JSON body.
#[allow(dead_code)]
pub async fn send_expect(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    status: StatusCode,
) -> Value {
    let response = send(app, method, uri, body).await;
    let actual = response.status();
    let json = body_json(response).await;
    assert_eq!(actual, status, "{method} {uri} returned {json}");
    json
}

/// Register a user and return the created profile.
#[allow(dead_code)]
pub async fn register_user(app: &Router, email: &str, password: &str) -> Value {
    let body = send_expect(
        app,
        "POST",
        "/api/auth/register",
        Some(serde_json::json!({
            "email": email,
            "password": password,
            "firstName": "Test",
            "lastName": "Athlete",
            "sport": "Running"
        })),
        StatusCode::CREATED,
    )
    .await;
    body["user"].clone()
}
