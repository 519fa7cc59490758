// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! AthleteTravel: plan trips around sporting events
//!
//! This crate provides the backend API (events, accommodations, training
//! facilities, trips, activity tracking and reminders) together with a typed
//! client for it.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;
use services::PasswordHasher;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub passwords: PasswordHasher,
}

impl AppState {
    /// Build state from config, seeding the catalog if configured.
    pub fn new(config: Config) -> Result<Self, services::password::PasswordError> {
        let passwords = PasswordHasher::new(config.password_hash_iterations)?;
        let db = if config.seed_sample_data {
            MemoryDb::with_sample_data()
        } else {
            MemoryDb::new()
        };

        Ok(Self {
            config,
            db,
            passwords,
        })
    }
}
