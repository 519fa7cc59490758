// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API client tests against a live server on a loopback port.

use athlete_travel::client::api::EventSearch;
use athlete_travel::client::{ApiClient, ClientError, QueryKey, NETWORK_ERROR_MESSAGE};
use athlete_travel::models::{InsertTrip, InsertUser, TripStatus, TripUpdate, UserUpdate};
use athlete_travel::AppState;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

mod common;

/// Serve a seeded app on an ephemeral port.
async fn spawn_server() -> (String, Arc<AppState>) {
    let (app, state) = common::create_test_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

fn new_user(email: &str) -> InsertUser {
    InsertUser {
        email: email.to_string(),
        password: "secret123".to_string(),
        first_name: "Casey".to_string(),
        last_name: "Runner".to_string(),
        sport: Some("Running".to_string()),
        level: None,
        goals: None,
        preferences: None,
    }
}

fn boston_trip(user_id: u64) -> InsertTrip {
    InsertTrip {
        user_id,
        event_id: Some(1),
        destination: "Boston, MA".to_string(),
        start_date: Utc.with_ymd_and_hms(2024, 3, 13, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 3, 17, 0, 0, 0).unwrap(),
        accommodation: None,
        facilities: Vec::new(),
        status: None,
        total_cost: Some(945.0),
        itinerary: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_event_search() {
    let (base_url, _) = spawn_server().await;
    let client = ApiClient::new(base_url);

    let events = client.events(&EventSearch::default()).await.unwrap();
    assert_eq!(events.len(), 3);

    let cycling = client
        .events(&EventSearch {
            sport: Some("Cycling".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cycling.len(), 1);
    assert_eq!(cycling[0].title, "Alps Challenge");

    // Two distinct searches, two cache entries
    assert_eq!(client.cache().len(), 2);
}

#[tokio::test]
async fn test_reads_are_cached_until_a_write() {
    let (base_url, state) = spawn_server().await;
    let client = ApiClient::new(base_url);

    assert!(client.trips(1).await.unwrap().is_empty());

    // Written behind the client's back: the cached list is still served
    state.db.create_trip(boston_trip(1)).await;
    assert!(client.trips(1).await.unwrap().is_empty());

    // A write through the client invalidates trip queries
    let trip = client.create_trip(&boston_trip(1)).await.unwrap();
    assert_eq!(trip.status, TripStatus::Planning);
    assert_eq!(client.trips(1).await.unwrap().len(), 2);

    let updated = client
        .update_trip(
            trip.id,
            &TripUpdate {
                status: Some(TripStatus::Active),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TripStatus::Active);
    assert_eq!(updated.total_cost, Some(945.0));

    client.delete_trip(trip.id).await.unwrap();
    assert_eq!(client.trips(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_reads_share_one_request() {
    let (base_url, _) = spawn_server().await;
    let client = ApiClient::new(base_url);

    let (a, b, c) = tokio::join!(
        client.accommodations(Some("Boston"), None, None),
        client.accommodations(Some("Boston"), None, None),
        client.accommodations(Some("Boston"), None, None),
    );
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(c.unwrap()[0].name, "The Athletic Downtown");

    let key = QueryKey::get("/api/accommodations").param("city", "Boston");
    assert!(client.cache().get(&key).is_some());
    assert_eq!(client.cache().len(), 1);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (base_url, _) = spawn_server().await;
    let client = ApiClient::new(base_url);

    let user = client.register(&new_user("casey@example.com")).await.unwrap();
    assert!(!user.is_authenticated);

    let err = client.me().await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let user = client.login("casey@example.com", "secret123").await.unwrap();
    assert!(user.is_authenticated);

    // The 401 was not cached, and the session token is now sent
    let me = client.me().await.unwrap();
    assert_eq!(me.id, user.id);

    let updated = client
        .update_user(
            user.id,
            &UserUpdate {
                level: Some("advanced".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.level.as_deref(), Some("advanced"));
    assert_eq!(client.me().await.unwrap().level.as_deref(), Some("advanced"));

    client.logout().await.unwrap();
    assert_eq!(client.me().await.unwrap_err().status(), Some(401));
}

#[tokio::test]
async fn test_api_errors_carry_server_message() {
    let (base_url, _) = spawn_server().await;
    let client = ApiClient::new(base_url);

    client.register(&new_user("casey@example.com")).await.unwrap();
    let err = client
        .register(&new_user("CASEY@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert_eq!(err.user_message(), "User already exists");

    let err = client.login("casey@example.com", "nope-nope").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid credentials");

    let err = client.event(404).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Event not found");
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let (base_url, state) = spawn_server().await;
    let client = ApiClient::new(base_url);

    assert!(client.trip(1).await.is_err());
    state.db.create_trip(boston_trip(1)).await;
    assert_eq!(client.trip(1).await.unwrap().destination, "Boston, MA");
}

#[tokio::test]
async fn test_network_error() {
    // Nothing listens on the discard port
    let client = ApiClient::new("http://127.0.0.1:9");

    let err = client.events(&EventSearch::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    assert!(client.cache().is_empty());
}
