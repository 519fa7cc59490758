// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip plan model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Lifecycle of a trip plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planning,
    Active,
    Completed,
}

/// Copy of the accommodation as it was when the trip was planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationSnapshot {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub accommodation_id: u64,
    pub name: String,
    pub price_per_night: f64,
}

/// Copy of a selected training facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySnapshot {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub facility_id: u64,
    pub name: String,
    pub price_per_day: Option<f64>,
}

/// A user's trip to an event or destination.
///
/// Accommodation and facilities are embedded by value, so later edits to
/// the source rows do not show up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub event_id: Option<u64>,
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub accommodation: Option<AccommodationSnapshot>,
    pub facilities: Vec<FacilitySnapshot>,
    pub status: TripStatus,
    pub total_cost: Option<f64>,
    pub itinerary: Option<Value>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_trip_dates"))]
pub struct InsertTrip {
    pub user_id: u64,
    pub event_id: Option<u64>,
    #[validate(length(min = 1, max = 200))]
    pub destination: String,
    #[serde(deserialize_with = "crate::time_utils::deserialize_date")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "crate::time_utils::deserialize_date")]
    pub end_date: DateTime<Utc>,
    pub accommodation: Option<AccommodationSnapshot>,
    #[serde(default)]
    pub facilities: Vec<FacilitySnapshot>,
    pub status: Option<TripStatus>,
    #[validate(range(min = 0.0))]
    pub total_cost: Option<f64>,
    pub itinerary: Option<Value>,
    pub notes: Option<String>,
}

fn validate_trip_dates(trip: &InsertTrip) -> Result<(), ValidationError> {
    if trip.end_date < trip.start_date {
        return Err(ValidationError::new("end_date_before_start_date"));
    }
    Ok(())
}

/// Partial trip update.
///
/// `userId` is not updatable: a trip stays with the user who planned it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    pub event_id: Option<u64>,
    #[validate(length(min = 1, max = 200))]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub end_date: Option<DateTime<Utc>>,
    pub accommodation: Option<AccommodationSnapshot>,
    pub facilities: Option<Vec<FacilitySnapshot>>,
    pub status: Option<TripStatus>,
    #[validate(range(min = 0.0))]
    pub total_cost: Option<f64>,
    pub itinerary: Option<Value>,
    pub notes: Option<String>,
}

impl Trip {
    pub fn from_insert(id: u64, insert: InsertTrip) -> Self {
        Self {
            id,
            user_id: insert.user_id,
            event_id: insert.event_id,
            destination: insert.destination,
            start_date: insert.start_date,
            end_date: insert.end_date,
            accommodation: insert.accommodation,
            facilities: insert.facilities,
            status: insert.status.unwrap_or_default(),
            total_cost: insert.total_cost,
            itinerary: insert.itinerary,
            notes: insert.notes,
            created_at: Utc::now(),
        }
    }

    /// Shallow merge of a partial update.
    pub fn apply(&mut self, update: TripUpdate) {
        if update.event_id.is_some() {
            self.event_id = update.event_id;
        }
        if let Some(destination) = update.destination {
            self.destination = destination;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if update.accommodation.is_some() {
            self.accommodation = update.accommodation;
        }
        if let Some(facilities) = update.facilities {
            self.facilities = facilities;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if update.total_cost.is_some() {
            self.total_cost = update.total_cost;
        }
        if update.itinerary.is_some() {
            self.itinerary = update.itinerary;
        }
        if update.notes.is_some() {
            self.notes = update.notes;
        }
    }
}
