// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles and password hashes)
//! - Events, accommodations and training facilities (searchable catalog)
//! - Trips (per-user plans)
//! - Health metrics and activities (append-only logs)
//! - Reminders (per-user, mutable)
//!
//! Each collection sits behind its own lock. Read-modify-write sequences
//! (uniqueness check + insert, merge + store) run under a single write
//! guard, so concurrent requests cannot interleave inside them.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::db::{collections, Table};
use crate::error::AppError;
use crate::models::user::normalize_email;
use crate::models::{
    Accommodation, AccommodationFilter, Activity, Event, EventFilter, FacilityFilter,
    HealthMetrics, InsertAccommodation, InsertActivity, InsertEvent, InsertHealthMetrics,
    InsertReminder, InsertTrainingFacility, InsertTrip, InsertUser, Reminder, ReminderUpdate,
    TrainingFacility, Trip, TripUpdate, User, UserUpdate, WeeklyStats,
};

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) users: RwLock<Table<User>>,
    pub(crate) events: RwLock<Table<Event>>,
    pub(crate) accommodations: RwLock<Table<Accommodation>>,
    pub(crate) facilities: RwLock<Table<TrainingFacility>>,
    pub(crate) trips: RwLock<Table<Trip>>,
    pub(crate) health_metrics: RwLock<Table<HealthMetrics>>,
    pub(crate) activities: RwLock<Table<Activity>>,
    pub(crate) reminders: RwLock<Table<Reminder>>,
}

/// In-memory database handle. Clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Tables>,
}

impl MemoryDb {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            inner: Arc::new(tables),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, id: u64) -> Option<User> {
        self.inner.users.read().await.get(id)
    }

    /// Look up a user by email (case-insensitive).
    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.inner
            .users
            .read()
            .await
            .rows()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Create a user with an already-hashed password.
    ///
    /// Fails with `Conflict` if the email is taken. The check runs before an
    /// id is allocated, so a rejected create does not consume an id.
    pub async fn create_user(&self, insert: InsertUser, password_hash: String) -> Result<User, AppError> {
        let mut users = self.inner.users.write().await;

        let email = normalize_email(&insert.email);
        if users.rows().any(|u| u.email == email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let user = users.insert_with(|id| User::from_insert(id, insert, password_hash));
        tracing::info!(
            collection = collections::USERS,
            user_id = user.id,
            "User created"
        );
        Ok(user)
    }

    /// Merge a partial update into a user.
    ///
    /// An unknown id yields `None` whatever the update. Changing the email
    /// to one held by another user fails with `Conflict`.
    pub async fn update_user(
        &self,
        id: u64,
        update: UserUpdate,
        password_hash: Option<String>,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.inner.users.write().await;
        if users.get(id).is_none() {
            return Ok(None);
        }

        if let Some(email) = update.email.as_deref().map(normalize_email) {
            if users.rows().any(|u| u.email == email && u.id != id) {
                return Err(AppError::Conflict("Email already in use".to_string()));
            }
        }

        Ok(users.update_with(id, |user| user.apply(update, password_hash)))
    }

    /// Flip the authenticated flag (set on login, cleared on logout).
    pub async fn set_user_authenticated(&self, id: u64, authenticated: bool) -> Option<User> {
        self.inner
            .users
            .write()
            .await
            .update_with(id, |user| user.is_authenticated = authenticated)
    }

    // ─── Event Operations ────────────────────────────────────────

    /// Matching events, earliest start first.
    pub async fn list_events(&self, filter: &EventFilter) -> Vec<Event> {
        let mut events = self.inner.events.read().await.filter(|e| filter.matches(e));
        events.sort_by_key(|e| e.start_date);
        events
    }

    pub async fn get_event(&self, id: u64) -> Option<Event> {
        self.inner.events.read().await.get(id)
    }

    pub async fn create_event(&self, insert: InsertEvent) -> Event {
        let event = self
            .inner
            .events
            .write()
            .await
            .insert_with(|id| Event::from_insert(id, insert));
        tracing::info!(collection = collections::EVENTS, event_id = event.id, "Event created");
        event
    }

    // ─── Accommodation Operations ────────────────────────────────

    /// Matching accommodations, cheapest first.
    pub async fn list_accommodations(&self, filter: &AccommodationFilter) -> Vec<Accommodation> {
        let mut rows = self
            .inner
            .accommodations
            .read()
            .await
            .filter(|a| filter.matches(a));
        rows.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
        rows
    }

    pub async fn get_accommodation(&self, id: u64) -> Option<Accommodation> {
        self.inner.accommodations.read().await.get(id)
    }

    pub async fn create_accommodation(&self, insert: InsertAccommodation) -> Accommodation {
        let accommodation = self
            .inner
            .accommodations
            .write()
            .await
            .insert_with(|id| Accommodation::from_insert(id, insert));
        tracing::info!(
            collection = collections::ACCOMMODATIONS,
            accommodation_id = accommodation.id,
            "Accommodation created"
        );
        accommodation
    }

    // ─── Training Facility Operations ────────────────────────────

    /// Matching facilities, cheapest first; facilities without a price last.
    pub async fn list_training_facilities(&self, filter: &FacilityFilter) -> Vec<TrainingFacility> {
        let mut rows = self
            .inner
            .facilities
            .read()
            .await
            .filter(|f| filter.matches(f));
        rows.sort_by(|a, b| compare_optional_price(a.price_per_day, b.price_per_day));
        rows
    }

    pub async fn get_training_facility(&self, id: u64) -> Option<TrainingFacility> {
        self.inner.facilities.read().await.get(id)
    }

    pub async fn create_training_facility(&self, insert: InsertTrainingFacility) -> TrainingFacility {
        let facility = self
            .inner
            .facilities
            .write()
            .await
            .insert_with(|id| TrainingFacility::from_insert(id, insert));
        tracing::info!(
            collection = collections::TRAINING_FACILITIES,
            facility_id = facility.id,
            "Training facility created"
        );
        facility
    }

    // ─── Trip Operations ─────────────────────────────────────────

    pub async fn list_trips_for_user(&self, user_id: u64) -> Vec<Trip> {
        self.inner
            .trips
            .read()
            .await
            .filter(|t| t.user_id == user_id)
    }

    pub async fn get_trip(&self, id: u64) -> Option<Trip> {
        self.inner.trips.read().await.get(id)
    }

    pub async fn create_trip(&self, insert: InsertTrip) -> Trip {
        let trip = self
            .inner
            .trips
            .write()
            .await
            .insert_with(|id| Trip::from_insert(id, insert));
        tracing::info!(
            collection = collections::TRIPS,
            trip_id = trip.id,
            user_id = trip.user_id,
            "Trip created"
        );
        trip
    }

    /// Merge a partial update into a trip.
    ///
    /// The merged trip must still end on or after its start date; otherwise
    /// nothing is stored and `Validation` is returned.
    pub async fn update_trip(&self, id: u64, update: TripUpdate) -> Result<Option<Trip>, AppError> {
        self.inner
            .trips
            .write()
            .await
            .try_update_with(id, |trip| {
                trip.apply(update);
                if trip.end_date < trip.start_date {
                    return Err(AppError::Validation(
                        "Trip end date must not be before its start date".to_string(),
                    ));
                }
                Ok(())
            })
    }

    /// Returns whether a trip was removed.
    pub async fn delete_trip(&self, id: u64) -> bool {
        let removed = self.inner.trips.write().await.remove(id);
        if removed {
            tracing::info!(collection = collections::TRIPS, trip_id = id, "Trip deleted");
        }
        removed
    }

    // ─── Health Metrics Operations ───────────────────────────────

    /// A user's readings, newest first, optionally truncated to `limit`.
    pub async fn list_health_metrics_for_user(
        &self,
        user_id: u64,
        limit: Option<usize>,
    ) -> Vec<HealthMetrics> {
        let mut rows = self
            .inner
            .health_metrics
            .read()
            .await
            .filter(|m| m.user_id == user_id);
        newest_first(&mut rows, |m| m.date, limit);
        rows
    }

    pub async fn create_health_metrics(&self, insert: InsertHealthMetrics) -> HealthMetrics {
        let metrics = self
            .inner
            .health_metrics
            .write()
            .await
            .insert_with(|id| HealthMetrics::from_insert(id, insert));
        tracing::debug!(
            collection = collections::HEALTH_METRICS,
            user_id = metrics.user_id,
            "Health metrics recorded"
        );
        metrics
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// A user's activities, newest first, optionally truncated to `limit`.
    pub async fn list_activities_for_user(&self, user_id: u64, limit: Option<usize>) -> Vec<Activity> {
        let mut rows = self
            .inner
            .activities
            .read()
            .await
            .filter(|a| a.user_id == user_id);
        newest_first(&mut rows, |a| a.date, limit);
        rows
    }

    pub async fn create_activity(&self, insert: InsertActivity) -> Activity {
        let activity = self
            .inner
            .activities
            .write()
            .await
            .insert_with(|id| Activity::from_insert(id, insert));
        tracing::debug!(
            collection = collections::ACTIVITIES,
            activity_id = activity.id,
            user_id = activity.user_id,
            "Activity logged"
        );
        activity
    }

    /// Totals over the user's activities in the seven days before `now`.
    pub async fn weekly_activity_stats(&self, user_id: u64, now: DateTime<Utc>) -> WeeklyStats {
        let activities = self.inner.activities.read().await;
        let mut stats = WeeklyStats::default();
        for activity in activities.rows().filter(|a| a.user_id == user_id) {
            stats.record(activity, now);
        }
        stats
    }

    // ─── Reminder Operations ─────────────────────────────────────

    /// All of a user's reminders, completed ones included.
    pub async fn list_reminders_for_user(&self, user_id: u64) -> Vec<Reminder> {
        self.inner
            .reminders
            .read()
            .await
            .filter(|r| r.user_id == user_id)
    }

    /// Open reminders due after `now`, soonest first.
    pub async fn upcoming_reminders(&self, user_id: u64, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut rows = self
            .inner
            .reminders
            .read()
            .await
            .filter(|r| r.user_id == user_id && r.is_upcoming(now));
        rows.sort_by_key(|r| r.due_date);
        rows
    }

    pub async fn get_reminder(&self, id: u64) -> Option<Reminder> {
        self.inner.reminders.read().await.get(id)
    }

    pub async fn create_reminder(&self, insert: InsertReminder) -> Reminder {
        let reminder = self
            .inner
            .reminders
            .write()
            .await
            .insert_with(|id| Reminder::from_insert(id, insert));
        tracing::debug!(
            collection = collections::REMINDERS,
            reminder_id = reminder.id,
            user_id = reminder.user_id,
            "Reminder created"
        );
        reminder
    }

    pub async fn update_reminder(&self, id: u64, update: ReminderUpdate) -> Option<Reminder> {
        self.inner
            .reminders
            .write()
            .await
            .update_with(id, |reminder| reminder.apply(update))
    }
}

/// Ascending price order with unpriced rows last.
fn compare_optional_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn newest_first<T>(rows: &mut Vec<T>, date: impl Fn(&T) -> DateTime<Utc>, limit: Option<usize>) {
    rows.sort_by_key(|r| std::cmp::Reverse(date(r)));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
}
