// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sporting event model and search filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Sport filter value meaning "no sport restriction".
pub const ANY_SPORT: &str = "All Sports";
/// Difficulty filter value meaning "no difficulty restriction".
pub const ANY_DIFFICULTY: &str = "Any Level";

/// A sporting event athletes can travel to.
///
/// `registered` and `capacity` are display data; nothing enforces
/// `registered <= capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub sport: String,
    pub location: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub price: Option<f64>,
    pub difficulty: Option<String>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub capacity: Option<u32>,
    pub registered: u32,
    pub organizer: Option<String>,
    pub image_url: Option<String>,
    pub amenities: Vec<String>,
}

/// Event creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_event_dates"))]
pub struct InsertEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub sport: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[serde(deserialize_with = "crate::time_utils::deserialize_date")]
    pub start_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub registration_deadline: Option<DateTime<Utc>>,
    pub capacity: Option<u32>,
    pub registered: Option<u32>,
    pub organizer: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

fn validate_event_dates(event: &InsertEvent) -> Result<(), ValidationError> {
    match event.end_date {
        Some(end) if end < event.start_date => {
            Err(ValidationError::new("end_date_before_start_date"))
        }
        _ => Ok(()),
    }
}

impl Event {
    pub fn from_insert(id: u64, insert: InsertEvent) -> Self {
        Self {
            id,
            title: insert.title,
            description: insert.description,
            sport: insert.sport,
            location: insert.location,
            city: insert.city,
            state: insert.state,
            country: insert.country,
            start_date: insert.start_date,
            end_date: insert.end_date,
            price: insert.price,
            difficulty: insert.difficulty,
            registration_deadline: insert.registration_deadline,
            capacity: insert.capacity,
            registered: insert.registered.unwrap_or(0),
            organizer: insert.organizer,
            image_url: insert.image_url,
            amenities: insert.amenities,
        }
    }
}

/// Event search predicates, ANDed together.
///
/// The date range applies to the event's start date and is inclusive on
/// both ends: `start_from` is compared against the start of its day and
/// `start_until` against the end of its day.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub sport: Option<String>,
    pub location: Option<String>,
    pub difficulty: Option<String>,
    pub start_from: Option<DateTime<Utc>>,
    pub start_until: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(sport) = self.sport.as_deref().filter(|s| *s != ANY_SPORT) {
            if !event.sport.eq_ignore_ascii_case(sport) {
                return false;
            }
        }

        if let Some(location) = &self.location {
            let needle = location.to_lowercase();
            let haystacks = [
                Some(event.location.as_str()),
                event.city.as_deref(),
                event.state.as_deref(),
                event.country.as_deref(),
            ];
            let found = haystacks
                .iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        if let Some(difficulty) = self.difficulty.as_deref().filter(|d| *d != ANY_DIFFICULTY) {
            match &event.difficulty {
                Some(d) if d.eq_ignore_ascii_case(difficulty) => {}
                _ => return false,
            }
        }

        if let Some(from) = self.start_from {
            if event.start_date < from {
                return false;
            }
        }

        if let Some(until) = self.start_until {
            if event.start_date > until {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(sport: &str, location: &str, day: u32) -> Event {
        Event {
            id: 1,
            title: format!("{} event", sport),
            description: None,
            sport: sport.to_string(),
            location: location.to_string(),
            city: None,
            state: None,
            country: Some("USA".to_string()),
            start_date: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
            end_date: None,
            price: None,
            difficulty: Some("Advanced".to_string()),
            registration_deadline: None,
            capacity: None,
            registered: 0,
            organizer: None,
            image_url: None,
            amenities: vec![],
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(EventFilter::default().matches(&event("Running", "Boston, MA", 1)));
    }

    #[test]
    fn test_sport_and_location() {
        let filter = EventFilter {
            sport: Some("running".to_string()),
            location: Some("boston".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&event("Running", "Boston, MA", 1)));
        assert!(!filter.matches(&event("Cycling", "Boston, MA", 1)));
        assert!(!filter.matches(&event("Running", "Austin, TX", 1)));
    }

    #[test]
    fn test_location_searches_country() {
        let filter = EventFilter {
            location: Some("usa".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&event("Running", "Boston, MA", 1)));
    }

    #[test]
    fn test_placeholder_values_do_not_filter() {
        let filter = EventFilter {
            sport: Some(ANY_SPORT.to_string()),
            difficulty: Some(ANY_DIFFICULTY.to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&event("Swimming", "Lake Tahoe", 1)));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let e = event("Running", "Boston", 10);
        let filter = EventFilter {
            start_from: Some(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap()),
            start_until: Some(Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(filter.matches(&e));

        let later = EventFilter {
            start_from: Some(Utc.with_ymd_and_hms(2024, 5, 11, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(!later.matches(&e));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let payload: InsertEvent = serde_json::from_value(serde_json::json!({
            "title": "Backwards Race",
            "sport": "Running",
            "location": "Nowhere",
            "startDate": "2024-06-02",
            "endDate": "2024-06-01"
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
