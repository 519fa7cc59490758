// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged workout activity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A completed workout. Append-only: never updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    /// Owner (not checked against the user collection)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    /// Workout kind (running, strength, swimming, ...)
    pub activity_type: String,
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub duration_minutes: Option<u32>,
    pub distance_km: Option<f64>,
    pub calories: Option<u32>,
    pub average_heart_rate: Option<u32>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertActivity {
    pub user_id: u64,
    #[validate(length(min = 1, max = 50))]
    pub activity_type: String,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub date: Option<DateTime<Utc>>,
    #[validate(range(max = 1440))]
    pub duration_minutes: Option<u32>,
    #[validate(range(min = 0.0))]
    pub distance_km: Option<f64>,
    pub calories: Option<u32>,
    #[validate(range(min = 20, max = 250))]
    pub average_heart_rate: Option<u32>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Activity {
    pub fn from_insert(id: u64, insert: InsertActivity) -> Self {
        Self {
            id,
            user_id: insert.user_id,
            activity_type: insert.activity_type,
            name: insert.name,
            date: insert.date.unwrap_or_else(Utc::now),
            duration_minutes: insert.duration_minutes,
            distance_km: insert.distance_km,
            calories: insert.calories,
            average_heart_rate: insert.average_heart_rate,
            location: insert.location,
            notes: insert.notes,
        }
    }
}
