// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reminder model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Something the athlete needs to do (check in for a flight, register, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    #[serde(rename = "type")]
    pub reminder_type: String,
    pub title: String,
    pub message: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertReminder {
    pub user_id: u64,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub reminder_type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReminderUpdate {
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub reminder_type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "crate::time_utils::deserialize_opt_date")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
}

impl Reminder {
    pub fn from_insert(id: u64, insert: InsertReminder) -> Self {
        Self {
            id,
            user_id: insert.user_id,
            reminder_type: insert.reminder_type,
            title: insert.title,
            message: insert.message,
            due_date: insert.due_date,
            priority: insert.priority.unwrap_or_default(),
            is_completed: insert.is_completed.unwrap_or(false),
        }
    }

    pub fn apply(&mut self, update: ReminderUpdate) {
        if let Some(reminder_type) = update.reminder_type {
            self.reminder_type = reminder_type;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(message) = update.message {
            self.message = message;
        }
        if update.due_date.is_some() {
            self.due_date = update.due_date;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(is_completed) = update.is_completed {
            self.is_completed = is_completed;
        }
    }

    /// Open and due strictly after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due > now)
    }
}
