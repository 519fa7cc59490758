// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed HTTP client for the AthleteTravel API.
//!
//! Reads go through a shared [`QueryCache`]; writes invalidate the cached
//! queries under the path they touch.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use super::cache::{QueryCache, QueryKey};
use super::ClientError;
use crate::models::{
    Accommodation, Activity, Event, HealthMetrics, InsertAccommodation, InsertActivity,
    InsertEvent, InsertHealthMetrics, InsertReminder, InsertTrainingFacility, InsertTrip,
    InsertUser, Reminder, ReminderUpdate, TrainingFacility, Trip, TripUpdate, User, UserUpdate,
    WeeklyStats,
};

/// Event search parameters; unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct EventSearch {
    pub sport: Option<String>,
    pub location: Option<String>,
    pub difficulty: Option<String>,
    /// `YYYY-MM-DD` or RFC3339
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    user: User,
}

#[derive(Deserialize)]
struct LoginBody {
    user: User,
    token: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// AthleteTravel API client. Clones share the cache and session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: QueryCache<Value>,
    session: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: QueryCache::new(),
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub fn cache(&self) -> &QueryCache<Value> {
        &self.cache
    }

    // ─── Transport ───────────────────────────────────────────────

    /// Send one request. A `204` yields `Value::Null`.
    async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let mut request = self.http.request(method, &url);
        if let Some(token) = self.session.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            };
            tracing::debug!(status = status.as_u16(), url = %url, message = %message, "API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Cached GET.
    async fn query<T: DeserializeOwned>(&self, key: QueryKey) -> Result<T, ClientError> {
        let client = self.clone();
        let target = key.path_and_query();
        let value = self
            .cache
            .fetch(key, move || async move {
                client.send(Method::GET, &target, None).await
            })
            .await?;
        decode(value)
    }

    /// Uncached write; invalidates `invalidates` on success.
    async fn mutate<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        invalidates: &str,
    ) -> Result<T, ClientError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        let value = self.send(method, path, body).await?;
        self.cache.invalidate_prefix(invalidates);
        decode(value)
    }

    // ─── Auth ────────────────────────────────────────────────────

    pub async fn register(&self, user: &InsertUser) -> Result<User, ClientError> {
        let body: RegisterBody = self
            .mutate(Method::POST, "/api/auth/register", Some(user), "/api/users")
            .await?;
        Ok(body.user)
    }

    /// Log in and keep the session token for later requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let credentials = Credentials { email, password };
        let body: LoginBody = self
            .mutate(Method::POST, "/api/auth/login", Some(&credentials), "/api")
            .await?;
        *self.session.write().await = Some(body.token);
        Ok(body.user)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let _: Value = self
            .mutate(Method::POST, "/api/auth/logout", None::<&()>, "/api")
            .await?;
        *self.session.write().await = None;
        Ok(())
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.query(QueryKey::get("/api/auth/me")).await
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn user(&self, id: u64) -> Result<User, ClientError> {
        self.query(QueryKey::get(format!("/api/users/{id}"))).await
    }

    pub async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<User, ClientError> {
        let user = self
            .mutate(Method::PUT, &format!("/api/users/{id}"), Some(update), "/api/users")
            .await?;
        self.cache.invalidate_prefix("/api/auth/me");
        Ok(user)
    }

    // ─── Catalog ─────────────────────────────────────────────────

    pub async fn events(&self, search: &EventSearch) -> Result<Vec<Event>, ClientError> {
        let key = QueryKey::get("/api/events")
            .param_opt("sport", search.sport.as_deref())
            .param_opt("location", search.location.as_deref())
            .param_opt("difficulty", search.difficulty.as_deref())
            .param_opt("startDate", search.start_date.as_deref())
            .param_opt("endDate", search.end_date.as_deref());
        self.query(key).await
    }

    pub async fn event(&self, id: u64) -> Result<Event, ClientError> {
        self.query(QueryKey::get(format!("/api/events/{id}"))).await
    }

    pub async fn create_event(&self, event: &InsertEvent) -> Result<Event, ClientError> {
        self.mutate(Method::POST, "/api/events", Some(event), "/api/events")
            .await
    }

    pub async fn accommodations(
        &self,
        city: Option<&str>,
        accommodation_type: Option<&str>,
        max_price: Option<f64>,
    ) -> Result<Vec<Accommodation>, ClientError> {
        let key = QueryKey::get("/api/accommodations")
            .param_opt("city", city)
            .param_opt("type", accommodation_type)
            .param_opt("maxPrice", max_price);
        self.query(key).await
    }

    pub async fn accommodation(&self, id: u64) -> Result<Accommodation, ClientError> {
        self.query(QueryKey::get(format!("/api/accommodations/{id}")))
            .await
    }

    pub async fn create_accommodation(
        &self,
        accommodation: &InsertAccommodation,
    ) -> Result<Accommodation, ClientError> {
        self.mutate(
            Method::POST,
            "/api/accommodations",
            Some(accommodation),
            "/api/accommodations",
        )
        .await
    }

    /// `sports` is sent comma-separated; a facility offering any of them matches.
    pub async fn training_facilities(
        &self,
        city: Option<&str>,
        facility_type: Option<&str>,
        sports: &[&str],
    ) -> Result<Vec<TrainingFacility>, ClientError> {
        let sports = (!sports.is_empty()).then(|| sports.join(","));
        let key = QueryKey::get("/api/training-facilities")
            .param_opt("city", city)
            .param_opt("type", facility_type)
            .param_opt("sports", sports);
        self.query(key).await
    }

    pub async fn training_facility(&self, id: u64) -> Result<TrainingFacility, ClientError> {
        self.query(QueryKey::get(format!("/api/training-facilities/{id}")))
            .await
    }

    pub async fn create_training_facility(
        &self,
        facility: &InsertTrainingFacility,
    ) -> Result<TrainingFacility, ClientError> {
        self.mutate(
            Method::POST,
            "/api/training-facilities",
            Some(facility),
            "/api/training-facilities",
        )
        .await
    }

    // ─── Trips ───────────────────────────────────────────────────

    pub async fn trips(&self, user_id: u64) -> Result<Vec<Trip>, ClientError> {
        self.query(QueryKey::get("/api/trips").param("userId", user_id))
            .await
    }

    pub async fn trip(&self, id: u64) -> Result<Trip, ClientError> {
        self.query(QueryKey::get(format!("/api/trips/{id}"))).await
    }

    pub async fn create_trip(&self, trip: &InsertTrip) -> Result<Trip, ClientError> {
        self.mutate(Method::POST, "/api/trips", Some(trip), "/api/trips")
            .await
    }

    pub async fn update_trip(&self, id: u64, update: &TripUpdate) -> Result<Trip, ClientError> {
        self.mutate(Method::PUT, &format!("/api/trips/{id}"), Some(update), "/api/trips")
            .await
    }

    pub async fn delete_trip(&self, id: u64) -> Result<(), ClientError> {
        let _: Value = self
            .mutate(Method::DELETE, &format!("/api/trips/{id}"), None::<&()>, "/api/trips")
            .await?;
        Ok(())
    }

    // ─── Tracking ────────────────────────────────────────────────

    pub async fn health_metrics(
        &self,
        user_id: u64,
        limit: Option<usize>,
    ) -> Result<Vec<HealthMetrics>, ClientError> {
        let key = QueryKey::get("/api/health-metrics")
            .param("userId", user_id)
            .param_opt("limit", limit);
        self.query(key).await
    }

    pub async fn record_health_metrics(
        &self,
        metrics: &InsertHealthMetrics,
    ) -> Result<HealthMetrics, ClientError> {
        self.mutate(
            Method::POST,
            "/api/health-metrics",
            Some(metrics),
            "/api/health-metrics",
        )
        .await
    }

    pub async fn activities(
        &self,
        user_id: u64,
        limit: Option<usize>,
    ) -> Result<Vec<Activity>, ClientError> {
        let key = QueryKey::get("/api/activities")
            .param("userId", user_id)
            .param_opt("limit", limit);
        self.query(key).await
    }

    /// Log an activity. Also refreshes the weekly stats.
    pub async fn log_activity(&self, activity: &InsertActivity) -> Result<Activity, ClientError> {
        self.mutate(Method::POST, "/api/activities", Some(activity), "/api/activities")
            .await
    }

    pub async fn weekly_stats(&self, user_id: u64) -> Result<WeeklyStats, ClientError> {
        self.query(QueryKey::get("/api/activities/weekly-stats").param("userId", user_id))
            .await
    }

    // ─── Reminders ───────────────────────────────────────────────

    pub async fn reminders(&self, user_id: u64, upcoming: bool) -> Result<Vec<Reminder>, ClientError> {
        let key = QueryKey::get("/api/reminders")
            .param("userId", user_id)
            .param_opt("upcoming", upcoming.then_some(true));
        self.query(key).await
    }

    pub async fn create_reminder(&self, reminder: &InsertReminder) -> Result<Reminder, ClientError> {
        self.mutate(Method::POST, "/api/reminders", Some(reminder), "/api/reminders")
            .await
    }

    pub async fn update_reminder(
        &self,
        id: u64,
        update: &ReminderUpdate,
    ) -> Result<Reminder, ClientError> {
        self.mutate(
            Method::PUT,
            &format!("/api/reminders/{id}"),
            Some(update),
            "/api/reminders",
        )
        .await
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
