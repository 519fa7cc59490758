// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rolling weekly training totals.
//!
//! Computed on read from the activity log; nothing is stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Activity;

/// Length of the stats window.
pub const WEEK_DAYS: i64 = 7;

/// Totals over the seven days before a reference instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub total_workouts: u32,
    pub total_calories: u64,
    pub total_distance_km: f64,
    pub total_duration_minutes: u64,
}

impl WeeklyStats {
    /// Start of the window ending at `now`.
    pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(WEEK_DAYS)
    }

    /// Add one activity to the totals.
    ///
    /// Returns `false` if the activity falls outside the window.
    pub fn record(&mut self, activity: &Activity, now: DateTime<Utc>) -> bool {
        if activity.date < Self::window_start(now) || activity.date > now {
            return false;
        }

        self.total_workouts += 1;
        self.total_calories += u64::from(activity.calories.unwrap_or(0));
        self.total_distance_km += activity.distance_km.unwrap_or(0.0);
        self.total_duration_minutes += u64::from(activity.duration_minutes.unwrap_or(0));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(days_ago: i64, calories: u32, distance: f64, minutes: u32) -> (Activity, DateTime<Utc>) {
        let now = Utc::now();
        let activity = Activity {
            id: 1,
            user_id: 1,
            activity_type: "running".to_string(),
            name: None,
            date: now - Duration::days(days_ago),
            duration_minutes: Some(minutes),
            distance_km: Some(distance),
            calories: Some(calories),
            average_heart_rate: None,
            location: None,
            notes: None,
        };
        (activity, now)
    }

    #[test]
    fn test_record_within_window() {
        let mut stats = WeeklyStats::default();
        let (activity, now) = make_activity(2, 654, 13.2, 62);

        assert!(stats.record(&activity, now));
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.total_calories, 654);
        assert_eq!(stats.total_duration_minutes, 62);
    }

    #[test]
    fn test_record_skips_old_activity() {
        let mut stats = WeeklyStats::default();
        let (activity, now) = make_activity(8, 300, 5.0, 30);

        assert!(!stats.record(&activity, now));
        assert_eq!(stats, WeeklyStats::default());
    }
}
