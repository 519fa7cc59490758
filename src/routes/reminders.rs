// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reminder routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::{IdPath, JsonBody, QueryParams};
use crate::error::{AppError, Result};
use crate::models::{InsertReminder, Reminder, ReminderUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/reminders", get(list_reminders).post(create_reminder))
        .route("/api/reminders/{id}", put(update_reminder))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderQuery {
    pub user_id: u64,
    /// Only open reminders that are due in the future
    #[serde(default)]
    pub upcoming: bool,
}

async fn list_reminders(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): QueryParams<ReminderQuery>,
) -> Result<Json<Vec<Reminder>>> {
    let reminders = if query.upcoming {
        state.db.upcoming_reminders(query.user_id, Utc::now()).await
    } else {
        state.db.list_reminders_for_user(query.user_id).await
    };
    Ok(Json(reminders))
}

async fn create_reminder(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertReminder>,
) -> Result<(StatusCode, Json<Reminder>)> {
    payload.validate()?;
    let reminder = state.db.create_reminder(payload).await;
    Ok((StatusCode::CREATED, Json(reminder)))
}

async fn update_reminder(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(update), _): JsonBody<ReminderUpdate>,
) -> Result<Json<Reminder>> {
    update.validate()?;
    state
        .db
        .update_reminder(id, update)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))
}
