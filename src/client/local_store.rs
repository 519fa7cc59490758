// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable client-side state that survives restarts without a server round trip.
//!
//! Each key lives in its own JSON file named `athleteTravel_<key>.json`
//! under the store directory. Missing or unreadable entries read as absent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    Activity, InsertActivity, InsertReminder, Reminder, TripStatus, User, WeeklyStats,
};

/// Namespace prepended to every key.
pub const KEY_PREFIX: &str = "athleteTravel_";
/// Most recent searches kept.
pub const SEARCH_HISTORY_LIMIT: usize = 10;

/// Storage keys (without the namespace prefix).
pub mod keys {
    pub const USER: &str = "user";
    pub const TRIPS: &str = "trips";
    pub const PROGRESS: &str = "progress";
    pub const REMINDERS: &str = "reminders";
    pub const PREFERENCES: &str = "preferences";
    pub const SEARCH_HISTORY: &str = "searchHistory";

    pub const ALL: &[&str] = &[USER, TRIPS, PROGRESS, REMINDERS, PREFERENCES, SEARCH_HISTORY];
}

#[derive(Debug, thiserror::Error)]
pub enum LocalStoreError {
    #[error("local storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid local data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LocalStoreError>;

/// A trip being planned on the device, before (or instead of) saving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    #[serde(default)]
    pub id: u64,
    pub user_id: u64,
    pub event_id: Option<u64>,
    pub accommodation_id: Option<u64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub status: TripStatus,
    pub itinerary: Option<Value>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: String,
    pub notifications: bool,
    pub units: String,
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            notifications: true,
            units: "metric".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Backup document produced by [`LocalStore::export`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub user: Option<User>,
    pub trips: Option<Vec<TripDraft>>,
    pub progress: Option<Vec<Activity>>,
    pub reminders: Option<Vec<Reminder>>,
    pub preferences: Option<Preferences>,
    pub search_history: Option<Vec<String>>,
    pub export_date: Option<DateTime<Utc>>,
}

/// Records kept in a per-user local collection.
pub trait LocalRecord: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
    fn user_id(&self) -> u64;
}

impl LocalRecord for TripDraft {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
    fn user_id(&self) -> u64 {
        self.user_id
    }
}

impl LocalRecord for Activity {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
    fn user_id(&self) -> u64 {
        self.user_id
    }
}

impl LocalRecord for Reminder {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
    fn user_id(&self) -> u64 {
        self.user_id
    }
}

/// File-backed key/value store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{KEY_PREFIX}{key}.json"))
    }

    // ─── Raw access ──────────────────────────────────────────────

    /// Read and decode `key`. Missing or corrupt data reads as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable local entry");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring corrupt local entry");
                None
            }
        }
    }

    /// Encode and write `key`, replacing the file atomically.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(value)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    // ─── Current user ────────────────────────────────────────────

    pub fn user(&self) -> Option<User> {
        self.get(keys::USER)
    }

    pub fn set_user(&self, user: &User) -> Result<()> {
        self.set(keys::USER, user)
    }

    /// Modify the stored profile in place. `None` if no profile is stored.
    pub fn update_user(&self, apply: impl FnOnce(&mut User)) -> Result<Option<User>> {
        let Some(mut user) = self.user() else {
            return Ok(None);
        };
        apply(&mut user);
        self.set_user(&user)?;
        Ok(Some(user))
    }

    pub fn clear_user(&self) -> Result<()> {
        self.remove(keys::USER)
    }

    // ─── Per-user collections ────────────────────────────────────

    fn all_records<T: LocalRecord>(&self, key: &str) -> Vec<T> {
        self.get(key).unwrap_or_default()
    }

    /// Records in `key` owned by `user_id`, in insertion order.
    pub fn records<T: LocalRecord>(&self, key: &str, user_id: u64) -> Vec<T> {
        self.all_records::<T>(key)
            .into_iter()
            .filter(|r| r.user_id() == user_id)
            .collect()
    }

    /// Append a record under a fresh local id.
    ///
    /// Ids are millisecond timestamps, bumped past the largest existing id
    /// so two adds in the same millisecond still get distinct ids.
    pub fn add_record<T: LocalRecord>(&self, key: &str, mut record: T) -> Result<T> {
        let mut all = self.all_records::<T>(key);
        let newest = all.iter().map(LocalRecord::id).max().unwrap_or(0);
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        record.set_id(now.max(newest + 1));
        all.push(record.clone());
        self.set(key, &all)?;
        Ok(record)
    }

    /// Modify the record with `id`. `None` if it does not exist.
    pub fn update_record<T: LocalRecord>(
        &self,
        key: &str,
        id: u64,
        apply: impl FnOnce(&mut T),
    ) -> Result<Option<T>> {
        let mut all = self.all_records::<T>(key);
        let Some(record) = all.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        apply(record);
        let updated = record.clone();
        self.set(key, &all)?;
        Ok(Some(updated))
    }

    /// Returns whether a record was removed.
    pub fn delete_record<T: LocalRecord>(&self, key: &str, id: u64) -> Result<bool> {
        let mut all = self.all_records::<T>(key);
        let before = all.len();
        all.retain(|r| r.id() != id);
        if all.len() == before {
            return Ok(false);
        }
        self.set(key, &all)?;
        Ok(true)
    }

    // ─── Trip drafts ─────────────────────────────────────────────

    pub fn trips(&self, user_id: u64) -> Vec<TripDraft> {
        self.records(keys::TRIPS, user_id)
    }

    pub fn add_trip(&self, draft: TripDraft) -> Result<TripDraft> {
        self.add_record(keys::TRIPS, draft)
    }

    pub fn update_trip(
        &self,
        id: u64,
        apply: impl FnOnce(&mut TripDraft),
    ) -> Result<Option<TripDraft>> {
        self.update_record(keys::TRIPS, id, apply)
    }

    pub fn delete_trip(&self, id: u64) -> Result<bool> {
        self.delete_record::<TripDraft>(keys::TRIPS, id)
    }

    // ─── Progress log ────────────────────────────────────────────

    pub fn progress(&self, user_id: u64) -> Vec<Activity> {
        self.records(keys::PROGRESS, user_id)
    }

    /// Log a workout; an entry without a date is stamped with the current time.
    pub fn add_progress(&self, entry: InsertActivity) -> Result<Activity> {
        self.add_record(keys::PROGRESS, Activity::from_insert(0, entry))
    }

    pub fn weekly_stats(&self, user_id: u64, now: DateTime<Utc>) -> WeeklyStats {
        let mut stats = WeeklyStats::default();
        for entry in self.progress(user_id) {
            stats.record(&entry, now);
        }
        stats
    }

    // ─── Reminders ───────────────────────────────────────────────

    pub fn reminders(&self, user_id: u64) -> Vec<Reminder> {
        self.records(keys::REMINDERS, user_id)
    }

    pub fn add_reminder(&self, reminder: InsertReminder) -> Result<Reminder> {
        self.add_record(keys::REMINDERS, Reminder::from_insert(0, reminder))
    }

    pub fn update_reminder(
        &self,
        id: u64,
        apply: impl FnOnce(&mut Reminder),
    ) -> Result<Option<Reminder>> {
        self.update_record(keys::REMINDERS, id, apply)
    }

    /// Returns whether the reminder existed.
    pub fn mark_completed(&self, id: u64) -> Result<bool> {
        let updated = self.update_reminder(id, |r| r.is_completed = true)?;
        Ok(updated.is_some())
    }

    /// Open reminders due after `now`, soonest first.
    pub fn upcoming_reminders(&self, user_id: u64, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut upcoming: Vec<Reminder> = self
            .reminders(user_id)
            .into_iter()
            .filter(|r| r.is_upcoming(now))
            .collect();
        upcoming.sort_by_key(|r| r.due_date);
        upcoming
    }

    // ─── Preferences ─────────────────────────────────────────────

    /// Stored preferences, with defaults for anything unset.
    pub fn preferences(&self) -> Preferences {
        self.get(keys::PREFERENCES).unwrap_or_default()
    }

    pub fn set_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.set(keys::PREFERENCES, preferences)
    }

    pub fn update_preferences(&self, apply: impl FnOnce(&mut Preferences)) -> Result<Preferences> {
        let mut preferences = self.preferences();
        apply(&mut preferences);
        self.set_preferences(&preferences)?;
        Ok(preferences)
    }

    // ─── Search history ──────────────────────────────────────────

    /// Recent searches, most recent first.
    pub fn search_history(&self) -> Vec<String> {
        self.get(keys::SEARCH_HISTORY).unwrap_or_default()
    }

    /// Record a search. Repeats move to the front; only the newest
    /// [`SEARCH_HISTORY_LIMIT`] are kept.
    pub fn add_search(&self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        let mut history = self.search_history();
        history.retain(|q| q != query);
        history.insert(0, query.to_string());
        history.truncate(SEARCH_HISTORY_LIMIT);
        self.set(keys::SEARCH_HISTORY, &history)
    }

    pub fn clear_search_history(&self) -> Result<()> {
        self.remove(keys::SEARCH_HISTORY)
    }

    // ─── Whole-store operations ──────────────────────────────────

    pub fn clear_all(&self) -> Result<()> {
        for key in keys::ALL {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Pretty-printed JSON backup of everything in the store.
    pub fn export(&self) -> Result<String> {
        let backup = Backup {
            user: self.user(),
            trips: self.get(keys::TRIPS),
            progress: self.get(keys::PROGRESS),
            reminders: self.get(keys::REMINDERS),
            preferences: Some(self.preferences()),
            search_history: Some(self.search_history()),
            export_date: Some(Utc::now()),
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    /// Restore from an [`export`](Self::export) document.
    ///
    /// Sections absent from the document are left untouched. A document
    /// that does not parse changes nothing.
    pub fn import(&self, json: &str) -> Result<()> {
        let backup: Backup = serde_json::from_str(json)?;

        if let Some(user) = &backup.user {
            self.set_user(user)?;
        }
        if let Some(trips) = &backup.trips {
            self.set(keys::TRIPS, trips)?;
        }
        if let Some(progress) = &backup.progress {
            self.set(keys::PROGRESS, progress)?;
        }
        if let Some(reminders) = &backup.reminders {
            self.set(keys::REMINDERS, reminders)?;
        }
        if let Some(preferences) = &backup.preferences {
            self.set_preferences(preferences)?;
        }
        if let Some(history) = &backup.search_history {
            self.set(keys::SEARCH_HISTORY, history)?;
        }

        tracing::info!("Imported local backup");
        Ok(())
    }
}
