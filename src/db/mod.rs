// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (in-memory).

pub mod memory;
mod seed;
pub mod table;

pub use memory::MemoryDb;
pub use table::Table;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const EVENTS: &str = "events";
    pub const ACCOMMODATIONS: &str = "accommodations";
    pub const TRAINING_FACILITIES: &str = "training_facilities";
    pub const TRIPS: &str = "trips";
    pub const HEALTH_METRICS: &str = "health_metrics";
    pub const ACTIVITIES: &str = "activities";
    pub const REMINDERS: &str = "reminders";
}
