// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily health metrics log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// One health-metrics reading. Append-only: never updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    pub date: DateTime<Utc>,
    /// Beats per minute
    pub resting_heart_rate: Option<u32>,
    /// Milliseconds
    pub heart_rate_variability: Option<f64>,
    pub sleep_hours: Option<f64>,
    /// 0-100
    pub sleep_score: Option<u8>,
    /// 0-100
    pub recovery_score: Option<u8>,
    /// Kilograms
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertHealthMetrics {
    pub user_id: u64,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub date: Option<DateTime<Utc>>,
    #[validate(range(min = 20, max = 250))]
    pub resting_heart_rate: Option<u32>,
    #[validate(range(min = 0.0))]
    pub heart_rate_variability: Option<f64>,
    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_hours: Option<f64>,
    #[validate(range(max = 100))]
    pub sleep_score: Option<u8>,
    #[validate(range(max = 100))]
    pub recovery_score: Option<u8>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

impl HealthMetrics {
    pub fn from_insert(id: u64, insert: InsertHealthMetrics) -> Self {
        Self {
            id,
            user_id: insert.user_id,
            date: insert.date.unwrap_or_else(Utc::now),
            resting_heart_rate: insert.resting_heart_rate,
            heart_rate_variability: insert.heart_rate_variability,
            sleep_hours: insert.sleep_hours,
            sleep_score: insert.sleep_score,
            recovery_score: insert.recovery_score,
            weight: insert.weight,
            notes: insert.notes,
        }
    }
}
