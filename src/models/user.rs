// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Registered athlete.
///
/// The password hash stays inside the store: it is never serialized, so any
/// JSON rendering of a `User` is safe to return to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub sport: Option<String>,
    pub level: Option<String>,
    pub goals: Option<Value>,
    pub preferences: Option<Value>,
    /// Set on login, cleared on logout
    #[serde(default)]
    pub is_authenticated: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration payload (insertable shape).
///
/// `password` is plain text here; routes hash it before it reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub sport: Option<String>,
    pub level: Option<String>,
    pub goals: Option<Value>,
    pub preferences: Option<Value>,
}

/// Partial user update; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub sport: Option<String>,
    pub level: Option<String>,
    pub goals: Option<Value>,
    pub preferences: Option<Value>,
}

/// Normalize an email for uniqueness checks and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Build a stored row from a validated registration and a password hash.
    pub fn from_insert(id: u64, insert: InsertUser, password_hash: String) -> Self {
        Self {
            id,
            email: normalize_email(&insert.email),
            password_hash,
            first_name: insert.first_name,
            last_name: insert.last_name,
            sport: insert.sport,
            level: insert.level,
            goals: insert.goals,
            preferences: insert.preferences,
            is_authenticated: false,
            created_at: Utc::now(),
        }
    }

    /// Shallow merge of a partial update.
    ///
    /// `password_hash` is the already-hashed replacement, if the update
    /// carried a new password.
    pub fn apply(&mut self, update: UserUpdate, password_hash: Option<String>) {
        if let Some(email) = update.email {
            self.email = normalize_email(&email);
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if update.sport.is_some() {
            self.sport = update.sport;
        }
        if update.level.is_some() {
            self.level = update.level;
        }
        if update.goals.is_some() {
            self.goals = update.goals;
        }
        if update.preferences.is_some() {
            self.preferences = update.preferences;
        }
    }
}
