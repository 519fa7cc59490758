// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event catalog routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::{IdPath, JsonBody, QueryParams};
use crate::error::{AppError, Result};
use crate::models::{Event, EventFilter, InsertEvent};
use crate::time_utils::{end_of_day, parse_date};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", get(get_event))
}

/// Query parameters for event search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    pub sport: Option<String>,
    pub location: Option<String>,
    pub difficulty: Option<String>,
    /// Earliest start date (inclusive)
    pub start_date: Option<String>,
    /// Latest start date (inclusive, whole day)
    pub end_date: Option<String>,
}

impl EventQuery {
    fn into_filter(self) -> Result<EventFilter> {
        let start_from = parse_query_date("startDate", self.start_date.as_deref())?;
        let start_until =
            parse_query_date("endDate", self.end_date.as_deref())?.map(end_of_day);

        Ok(EventFilter {
            sport: non_empty(self.sport),
            location: non_empty(self.location),
            difficulty: non_empty(self.difficulty),
            start_from,
            start_until,
        })
    }
}

/// Blank query values mean "no filter".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_query_date(name: &str, raw: Option<&str>) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid {name}: {raw}"))),
        None => Ok(None),
    }
}

async fn list_events(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): QueryParams<EventQuery>,
) -> Result<Json<Vec<Event>>> {
    let filter = query.into_filter()?;
    Ok(Json(state.db.list_events(&filter).await))
}

async fn get_event(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<Event>> {
    state
        .db
        .get_event(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertEvent>,
) -> Result<(StatusCode, Json<Event>)> {
    payload.validate()?;
    let event = state.db.create_event(payload).await;
    Ok((StatusCode::CREATED, Json(event)))
}
