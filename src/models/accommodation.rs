// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Accommodation model and search filter.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Lodging near an event.
///
/// `rating` is on a 0-5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub location: String,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub accommodation_type: Option<String>,
    pub price_per_night: f64,
    pub rating: Option<f64>,
    pub amenities: Vec<String>,
    /// Sport-specific extras (bike storage, ice baths, ...)
    pub athletic_amenities: Vec<String>,
    /// Kilometres to the nearest event venue
    pub distance_to_event: Option<f64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_athlete_friendly: bool,
}

/// Accommodation creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertAccommodation {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub accommodation_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub athletic_amenities: Vec<String>,
    #[validate(range(min = 0.0))]
    pub distance_to_event: Option<f64>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_athlete_friendly: bool,
}

impl Accommodation {
    pub fn from_insert(id: u64, insert: InsertAccommodation) -> Self {
        Self {
            id,
            name: insert.name,
            location: insert.location,
            city: insert.city,
            accommodation_type: insert.accommodation_type,
            price_per_night: insert.price_per_night,
            rating: insert.rating,
            amenities: insert.amenities,
            athletic_amenities: insert.athletic_amenities,
            distance_to_event: insert.distance_to_event,
            image_url: insert.image_url,
            description: insert.description,
            is_athlete_friendly: insert.is_athlete_friendly,
        }
    }
}

/// Accommodation search predicates, ANDed together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationFilter {
    /// Case-insensitive substring of the city or location
    pub city: Option<String>,
    /// Case-insensitive exact accommodation type
    #[serde(rename = "type")]
    pub accommodation_type: Option<String>,
    /// Inclusive nightly price ceiling
    pub max_price: Option<f64>,
}

impl AccommodationFilter {
    pub fn matches(&self, accommodation: &Accommodation) -> bool {
        if let Some(city) = &self.city {
            let needle = city.to_lowercase();
            let in_city = accommodation
                .city
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !in_city && !accommodation.location.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(kind) = &self.accommodation_type {
            let same_type = accommodation
                .accommodation_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(kind));
            if !same_type {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if accommodation.price_per_night > max_price {
                return false;
            }
        }

        true
    }
}
