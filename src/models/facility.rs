// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training facility model and search filter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Status assigned when a facility is created without one.
pub const DEFAULT_FACILITY_STATUS: &str = "open";

/// Gym, pool, track or other place to train while travelling.
///
/// `status` is free-form ("open", "busy", "closed" in practice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct TrainingFacility {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: String,
    pub location: String,
    pub city: Option<String>,
    pub price_per_day: Option<f64>,
    pub amenities: Vec<String>,
    pub sports: Vec<String>,
    pub hours: Option<Value>,
    pub status: String,
    pub rating: Option<f64>,
    pub distance: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertTrainingFacility {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub facility_type: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub city: Option<String>,
    #[validate(range(min = 0.0))]
    pub price_per_day: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub sports: Vec<String>,
    pub hours: Option<Value>,
    pub status: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    pub distance: Option<String>,
}

impl TrainingFacility {
    pub fn from_insert(id: u64, insert: InsertTrainingFacility) -> Self {
        Self {
            id,
            name: insert.name,
            facility_type: insert.facility_type,
            location: insert.location,
            city: insert.city,
            price_per_day: insert.price_per_day,
            amenities: insert.amenities,
            sports: insert.sports,
            hours: insert.hours,
            status: insert
                .status
                .unwrap_or_else(|| DEFAULT_FACILITY_STATUS.to_string()),
            rating: insert.rating,
            distance: insert.distance,
        }
    }
}

/// Facility search predicates, ANDed together.
#[derive(Debug, Clone, Default)]
pub struct FacilityFilter {
    pub city: Option<String>,
    pub facility_type: Option<String>,
    /// Facility must offer at least one of these sports
    pub sports: Vec<String>,
}

impl FacilityFilter {
    /// Build a filter from raw query values; `sports` is comma-separated.
    pub fn new(city: Option<String>, facility_type: Option<String>, sports: Option<&str>) -> Self {
        let sports = sports
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            city,
            facility_type,
            sports,
        }
    }

    pub fn matches(&self, facility: &TrainingFacility) -> bool {
        if let Some(city) = &self.city {
            let needle = city.to_lowercase();
            let in_city = facility
                .city
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !in_city && !facility.location.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(kind) = &self.facility_type {
            if !facility.facility_type.eq_ignore_ascii_case(kind) {
                return false;
            }
        }

        if !self.sports.is_empty() {
            let offered = self.sports.iter().any(|wanted| {
                facility
                    .sports
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(wanted))
            });
            if !offered {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> TrainingFacility {
        TrainingFacility::from_insert(
            3,
            InsertTrainingFacility {
                name: "Aquatic Center".to_string(),
                facility_type: "Swimming".to_string(),
                location: "Boston, MA".to_string(),
                city: Some("Boston".to_string()),
                price_per_day: Some(15.0),
                amenities: vec![],
                sports: vec!["Swimming".to_string(), "Triathlon".to_string()],
                hours: None,
                status: None,
                rating: Some(4.7),
                distance: None,
            },
        )
    }

    #[test]
    fn test_default_status() {
        assert_eq!(pool().status, "open");
    }

    #[test]
    fn test_sports_filter_matches_any() {
        let filter = FacilityFilter::new(None, None, Some("running, triathlon"));
        assert_eq!(filter.sports.len(), 2);
        assert!(filter.matches(&pool()));

        let filter = FacilityFilter::new(None, None, Some("Cycling"));
        assert!(!filter.matches(&pool()));
    }

    #[test]
    fn test_empty_sports_param_is_ignored() {
        let filter = FacilityFilter::new(Some("boston".to_string()), None, Some(" , "));
        assert!(filter.sports.is_empty());
        assert!(filter.matches(&pool()));
    }
}
