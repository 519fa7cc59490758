// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stored rows survive a trip through their JSON wire form unchanged.

use athlete_travel::db::MemoryDb;
use athlete_travel::models::{
    AccommodationSnapshot, Event, FacilitySnapshot, InsertEvent, InsertTrip, InsertUser, Trip,
    TripStatus, User,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

#[tokio::test]
async fn test_event_json_matches_created_row() {
    let db = MemoryDb::new();
    let created = db
        .create_event(InsertEvent {
            title: "Boston Marathon".to_string(),
            description: Some("The oldest annual marathon".to_string()),
            sport: "Running".to_string(),
            location: "Hopkinton to Boston".to_string(),
            city: Some("Boston".to_string()),
            state: Some("MA".to_string()),
            country: Some("USA".to_string()),
            start_date: Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap(),
            end_date: Some(Utc.with_ymd_and_hms(2024, 4, 15, 17, 30, 0).unwrap()),
            price: Some(225.5),
            difficulty: Some("Advanced".to_string()),
            registration_deadline: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            capacity: Some(30_000),
            registered: None,
            organizer: None,
            image_url: Some("https://example.com/boston.jpg".to_string()),
            amenities: vec!["Expo".to_string(), "Medal".to_string()],
        })
        .await;

    let wire = serde_json::to_string(&created).unwrap();
    let parsed: Event = serde_json::from_str(&wire).unwrap();
    assert_eq!(parsed, created);
}

#[tokio::test]
async fn test_trip_json_matches_created_row() {
    let db = MemoryDb::new();
    let created = db
        .create_trip(InsertTrip {
            user_id: 4,
            event_id: Some(1),
            destination: "Chamonix, France".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 7, 9, 0, 0, 0).unwrap(),
            accommodation: Some(AccommodationSnapshot {
                accommodation_id: 2,
                name: "Alpine Lodge".to_string(),
                price_per_night: 145.75,
            }),
            facilities: vec![
                FacilitySnapshot {
                    facility_id: 3,
                    name: "Mont Blanc Trails".to_string(),
                    price_per_day: None,
                },
                FacilitySnapshot {
                    facility_id: 5,
                    name: "Altitude Gym".to_string(),
                    price_per_day: Some(20.0),
                },
            ],
            status: Some(TripStatus::Active),
            total_cost: Some(1_260.25),
            itinerary: Some(json!({ "days": [{ "day": 1, "plan": "Shakeout run" }] })),
            notes: None,
        })
        .await;

    let wire = serde_json::to_string(&created).unwrap();
    let parsed: Trip = serde_json::from_str(&wire).unwrap();
    assert_eq!(parsed, created);
    assert_eq!(parsed.facilities.len(), 2);
    assert!(parsed.created_at <= Utc::now());
}

#[tokio::test]
async fn test_user_json_matches_created_row_without_password() {
    let db = MemoryDb::new();
    let created = db
        .create_user(
            InsertUser {
                email: "Triathlete@Example.com".to_string(),
                password: "secret123".to_string(),
                first_name: "Jordan".to_string(),
                last_name: "Swim".to_string(),
                sport: Some("Triathlon".to_string()),
                level: Some("intermediate".to_string()),
                goals: Some(json!(["sub-12 Ironman"])),
                preferences: Some(json!({ "units": "metric" })),
            },
            "pbkdf2$1000$c2FsdA$aGFzaA".to_string(),
        )
        .await
        .unwrap();

    let wire = serde_json::to_string(&created).unwrap();
    let object: Value = serde_json::from_str(&wire).unwrap();
    assert!(object.get("password").is_none());
    assert!(object.get("passwordHash").is_none());

    let mut parsed: User = serde_json::from_str(&wire).unwrap();
    assert!(parsed.password_hash.is_empty());
    parsed.password_hash = created.password_hash.clone();
    assert_eq!(parsed, created);
}
