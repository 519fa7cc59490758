// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health metrics and activity log routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use super::{JsonBody, QueryParams, UserQuery};
use crate::error::Result;
use crate::models::{
    Activity, HealthMetrics, InsertActivity, InsertHealthMetrics, WeeklyStats,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/health-metrics",
            get(list_health_metrics).post(create_health_metrics),
        )
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/weekly-stats", get(weekly_stats))
}

// ─── Health Metrics ──────────────────────────────────────────

async fn list_health_metrics(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): QueryParams<UserQuery>,
) -> Result<Json<Vec<HealthMetrics>>> {
    let metrics = state
        .db
        .list_health_metrics_for_user(query.user_id, query.limit)
        .await;
    Ok(Json(metrics))
}

async fn create_health_metrics(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertHealthMetrics>,
) -> Result<(StatusCode, Json<HealthMetrics>)> {
    payload.validate()?;
    let metrics = state.db.create_health_metrics(payload).await;
    Ok((StatusCode::CREATED, Json(metrics)))
}

// ─── Activities ──────────────────────────────────────────────

async fn list_activities(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): QueryParams<UserQuery>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state
        .db
        .list_activities_for_user(query.user_id, query.limit)
        .await;
    Ok(Json(activities))
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertActivity>,
) -> Result<(StatusCode, Json<Activity>)> {
    payload.validate()?;
    let activity = state.db.create_activity(payload).await;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// Totals for the seven days up to now.
async fn weekly_stats(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): QueryParams<UserQuery>,
) -> Result<Json<WeeklyStats>> {
    let stats = state
        .db
        .weekly_activity_stats(query.user_id, Utc::now())
        .await;
    Ok(Json(stats))
}
