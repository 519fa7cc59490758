// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip planning tests: create, list per user, partial update and delete.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;
use common::send_expect;

async fn create_trip(app: &axum::Router, user_id: u64, destination: &str) -> Value {
    send_expect(
        app,
        "POST",
        "/api/trips",
        Some(json!({
            "userId": user_id,
            "eventId": 1,
            "destination": destination,
            "startDate": "2024-03-13",
            "endDate": "2024-03-17",
            "accommodation": {
                "accommodationId": 1,
                "name": "The Athletic Downtown",
                "pricePerNight": 189.0
            }
        })),
        StatusCode::CREATED,
    )
    .await
}

#[tokio::test]
async fn test_create_trip_defaults() {
    let (app, _) = common::create_test_app();

    let trip = create_trip(&app, 1, "Boston, MA").await;

    assert_eq!(trip["id"], 1);
    assert_eq!(trip["status"], "planning");
    assert_eq!(trip["facilities"], json!([]));
    assert_eq!(trip["accommodation"]["name"], "The Athletic Downtown");
    assert!(trip["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_trip_rejects_reversed_dates() {
    let (app, state) = common::create_test_app();

    let body = send_expect(
        &app,
        "POST",
        "/api/trips",
        Some(json!({
            "userId": 1,
            "destination": "Boston, MA",
            "startDate": "2024-03-17",
            "endDate": "2024-03-13"
        })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(body["message"].is_string());
    assert!(state.db.list_trips_for_user(1).await.is_empty());
}

#[tokio::test]
async fn test_list_trips_per_user() {
    let (app, _) = common::create_test_app();
    create_trip(&app, 1, "Boston, MA").await;
    create_trip(&app, 2, "French Alps").await;
    create_trip(&app, 1, "Lake Tahoe, CA").await;

    let trips = send_expect(&app, "GET", "/api/trips?userId=1", None, StatusCode::OK).await;
    let destinations: Vec<_> = trips
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["destination"].as_str().unwrap())
        .collect();
    assert_eq!(destinations, vec!["Boston, MA", "Lake Tahoe, CA"]);

    let none = send_expect(&app, "GET", "/api/trips?userId=7", None, StatusCode::OK).await;
    assert_eq!(none, json!([]));

    let body = send_expect(&app, "GET", "/api/trips", None, StatusCode::BAD_REQUEST).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_update_trip_merges_fields() {
    let (app, _) = common::create_test_app();
    let trip = create_trip(&app, 1, "Boston, MA").await;

    let updated = send_expect(
        &app,
        "PUT",
        "/api/trips/1",
        Some(json!({ "status": "active", "notes": "Carb load on Saturday" })),
        StatusCode::OK,
    )
    .await;

    assert_eq!(updated["status"], "active");
    assert_eq!(updated["notes"], "Carb load on Saturday");
    assert_eq!(updated["destination"], trip["destination"]);
    assert_eq!(updated["accommodation"], trip["accommodation"]);
    assert_eq!(updated["createdAt"], trip["createdAt"]);
}

#[tokio::test]
async fn test_update_trip_checks_merged_dates() {
    let (app, _) = common::create_test_app();
    create_trip(&app, 1, "Boston, MA").await;

    // Start moved past the stored end date
    send_expect(
        &app,
        "PUT",
        "/api/trips/1",
        Some(json!({ "startDate": "2024-03-20" })),
        StatusCode::BAD_REQUEST,
    )
    .await;

    let unchanged = send_expect(&app, "GET", "/api/trips/1", None, StatusCode::OK).await;
    assert_eq!(unchanged["startDate"], "2024-03-13T00:00:00Z");

    // Moving both together is fine
    let moved = send_expect(
        &app,
        "PUT",
        "/api/trips/1",
        Some(json!({ "startDate": "2024-03-20", "endDate": "2024-03-22" })),
        StatusCode::OK,
    )
    .await;
    assert_eq!(moved["endDate"], "2024-03-22T00:00:00Z");
}

#[tokio::test]
async fn test_update_unknown_trip() {
    let (app, _) = common::create_test_app();

    let body = send_expect(
        &app,
        "PUT",
        "/api/trips/5",
        Some(json!({ "notes": "hello" })),
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["message"], "Trip not found");
}

#[tokio::test]
async fn test_delete_trip() {
    let (app, _) = common::create_test_app();
    create_trip(&app, 1, "Boston, MA").await;

    let body = send_expect(&app, "DELETE", "/api/trips/1", None, StatusCode::NO_CONTENT).await;
    assert_eq!(body, Value::Null);

    send_expect(&app, "GET", "/api/trips/1", None, StatusCode::NOT_FOUND).await;
    send_expect(&app, "DELETE", "/api/trips/1", None, StatusCode::NOT_FOUND).await;

    // Ids are never reused
    let next = create_trip(&app, 1, "French Alps").await;
    assert_eq!(next["id"], 2);
}

#[tokio::test]
async fn test_malformed_trip_body() {
    let (app, _) = common::create_test_app();

    let response = common::send(&app, "POST", "/api/trips", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = send_expect(
        &app,
        "POST",
        "/api/trips",
        Some(json!({
            "userId": "one",
            "destination": "Boston",
            "startDate": "2024-03-13",
            "endDate": "2024-03-17"
        })),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}
