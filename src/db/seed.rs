// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sample catalog loaded at startup when `SEED_SAMPLE_DATA` is set.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use tokio::sync::RwLock;

use super::memory::Tables;
use super::{MemoryDb, Table};
use crate::models::{Accommodation, Event, TrainingFacility};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl MemoryDb {
    /// A store pre-populated with three events, three accommodations and
    /// three Boston training facilities.
    pub fn with_sample_data() -> Self {
        let mut events = Table::default();
        for event in sample_events() {
            events.insert_with(|id| Event { id, ..event });
        }

        let mut accommodations = Table::default();
        for accommodation in sample_accommodations() {
            accommodations.insert_with(|id| Accommodation { id, ..accommodation });
        }

        let mut facilities = Table::default();
        for facility in sample_facilities() {
            facilities.insert_with(|id| TrainingFacility { id, ..facility });
        }

        tracing::debug!(
            events = events.len(),
            accommodations = accommodations.len(),
            facilities = facilities.len(),
            "Loaded sample catalog"
        );

        Self::from_tables(Tables {
            events: RwLock::new(events),
            accommodations: RwLock::new(accommodations),
            facilities: RwLock::new(facilities),
            ..Tables::default()
        })
    }
}

fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: 0,
            title: "Boston Marathon".to_string(),
            description: Some(
                "Join thousands of runners in this iconic 26.2-mile race through Boston's historic neighborhoods."
                    .to_string(),
            ),
            sport: "Running".to_string(),
            location: "Boston, MA".to_string(),
            city: Some("Boston".to_string()),
            state: Some("MA".to_string()),
            country: Some("USA".to_string()),
            start_date: date(2024, 3, 15),
            end_date: None,
            price: Some(250.0),
            difficulty: Some("Advanced".to_string()),
            registration_deadline: Some(date(2024, 2, 15)),
            capacity: Some(30_000),
            registered: 28_500,
            organizer: Some("Boston Athletic Association".to_string()),
            image_url: Some("https://images.unsplash.com/photo-1544717297-fa95b6ee9643".to_string()),
            amenities: Vec::new(),
        },
        Event {
            id: 0,
            title: "Alps Challenge".to_string(),
            description: Some(
                "Conquer the challenging mountain passes of the French Alps in this multi-stage cycling event."
                    .to_string(),
            ),
            sport: "Cycling".to_string(),
            location: "French Alps".to_string(),
            city: None,
            state: None,
            country: Some("France".to_string()),
            start_date: date(2024, 4, 22),
            end_date: None,
            price: Some(450.0),
            difficulty: Some("Expert".to_string()),
            registration_deadline: Some(date(2024, 3, 22)),
            capacity: Some(500),
            registered: 320,
            organizer: Some("Alpine Sports Federation".to_string()),
            image_url: Some("https://images.unsplash.com/photo-1558618666-fcd25c85cd64".to_string()),
            amenities: Vec::new(),
        },
        Event {
            id: 0,
            title: "Open Water Championship".to_string(),
            description: Some(
                "Test your endurance in crystal clear waters with distances from 1K to 10K available."
                    .to_string(),
            ),
            sport: "Swimming".to_string(),
            location: "Lake Tahoe, CA".to_string(),
            city: Some("Lake Tahoe".to_string()),
            state: Some("CA".to_string()),
            country: Some("USA".to_string()),
            start_date: date(2024, 5, 8),
            end_date: None,
            price: Some(180.0),
            difficulty: Some("Intermediate".to_string()),
            registration_deadline: Some(date(2024, 4, 8)),
            capacity: Some(1000),
            registered: 750,
            organizer: Some("Open Water Swimming Association".to_string()),
            image_url: Some("https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b".to_string()),
            amenities: Vec::new(),
        },
    ]
}

fn sample_accommodations() -> Vec<Accommodation> {
    vec![
        Accommodation {
            id: 0,
            name: "The Athletic Downtown".to_string(),
            location: "Boston, MA".to_string(),
            city: Some("Boston".to_string()),
            accommodation_type: Some("hotel".to_string()),
            price_per_night: 189.0,
            rating: Some(4.8),
            amenities: strings(&["Gym", "Pool", "Nutrition Center", "Recovery Room"]),
            athletic_amenities: strings(&["Recovery Room", "Nutrition Center"]),
            distance_to_event: Some(1.2),
            image_url: Some("https://images.unsplash.com/photo-1566073771259-6a8506099945".to_string()),
            description: Some("Modern hotel with state-of-the-art athletic facilities".to_string()),
            is_athlete_friendly: true,
        },
        Accommodation {
            id: 0,
            name: "Recovery Resort & Spa".to_string(),
            location: "Scottsdale, AZ".to_string(),
            city: Some("Scottsdale".to_string()),
            accommodation_type: Some("resort".to_string()),
            price_per_night: 299.0,
            rating: Some(4.9),
            amenities: strings(&["Spa", "Track", "Nutrition", "Recovery Center"]),
            athletic_amenities: strings(&["Track", "Recovery Center"]),
            distance_to_event: None,
            image_url: Some("https://images.unsplash.com/photo-1571896349842-33c89424de2d".to_string()),
            description: Some("Luxury resort focused on athletic recovery and performance".to_string()),
            is_athlete_friendly: true,
        },
        Accommodation {
            id: 0,
            name: "FitStay Budget Inn".to_string(),
            location: "Austin, TX".to_string(),
            city: Some("Austin".to_string()),
            accommodation_type: Some("hotel".to_string()),
            price_per_night: 89.0,
            rating: Some(4.2),
            amenities: strings(&["Gym", "Bike Storage", "WiFi"]),
            athletic_amenities: strings(&["Bike Storage"]),
            distance_to_event: None,
            image_url: Some("https://images.unsplash.com/photo-1551882547-ff40c63fe5fa".to_string()),
            description: Some(
                "Budget-friendly accommodation with essential athletic amenities".to_string(),
            ),
            is_athlete_friendly: true,
        },
    ]
}

fn sample_facilities() -> Vec<TrainingFacility> {
    vec![
        TrainingFacility {
            id: 0,
            name: "Elite Performance Center".to_string(),
            facility_type: "Full Gym".to_string(),
            location: "Boston, MA".to_string(),
            city: Some("Boston".to_string()),
            price_per_day: Some(25.0),
            amenities: strings(&["Pool", "Track", "Weights", "Cardio"]),
            sports: strings(&["Running", "Swimming", "Strength"]),
            hours: Some(json!({ "mon-fri": "5:00-23:00", "sat-sun": "6:00-22:00" })),
            status: "open".to_string(),
            rating: Some(4.9),
            distance: Some("0.3 miles".to_string()),
        },
        TrainingFacility {
            id: 0,
            name: "CrossFit Downtown".to_string(),
            facility_type: "CrossFit".to_string(),
            location: "Boston, MA".to_string(),
            city: Some("Boston".to_string()),
            price_per_day: Some(30.0),
            amenities: strings(&["CrossFit Equipment", "Classes", "Personal Training"]),
            sports: strings(&["CrossFit", "Strength"]),
            hours: Some(json!({ "mon-fri": "6:00-22:00", "sat-sun": "8:00-20:00" })),
            status: "busy".to_string(),
            rating: Some(4.6),
            distance: Some("0.7 miles".to_string()),
        },
        TrainingFacility {
            id: 0,
            name: "Aquatic Center".to_string(),
            facility_type: "Swimming".to_string(),
            location: "Boston, MA".to_string(),
            city: Some("Boston".to_string()),
            price_per_day: Some(15.0),
            amenities: strings(&["Olympic Pool", "Diving", "Swimming Lessons"]),
            sports: strings(&["Swimming"]),
            hours: Some(json!({ "mon-fri": "5:30-22:00", "sat-sun": "7:00-20:00" })),
            status: "open".to_string(),
            rating: Some(4.7),
            distance: Some("1.2 miles".to_string()),
        },
    ]
}
