// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.
//!
//! Each entity has a stored shape (with the server-assigned `id`) and an
//! `Insert*` shape carrying only what a client may supply on creation.

pub mod accommodation;
pub mod activity;
pub mod event;
pub mod facility;
pub mod health;
pub mod reminder;
pub mod stats;
pub mod trip;
pub mod user;

pub use accommodation::{Accommodation, AccommodationFilter, InsertAccommodation};
pub use activity::{Activity, InsertActivity};
pub use event::{Event, EventFilter, InsertEvent};
pub use facility::{FacilityFilter, InsertTrainingFacility, TrainingFacility};
pub use health::{HealthMetrics, InsertHealthMetrics};
pub use reminder::{InsertReminder, Priority, Reminder, ReminderUpdate};
pub use stats::WeeklyStats;
pub use trip::{AccommodationSnapshot, FacilitySnapshot, InsertTrip, Trip, TripStatus, TripUpdate};
pub use user::{InsertUser, User, UserUpdate};
