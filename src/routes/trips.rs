// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip planning routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use validator::Validate;

use super::{IdPath, JsonBody, QueryParams, UserQuery};
use crate::error::{AppError, Result};
use crate::models::{InsertTrip, Trip, TripUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trips", get(list_trips).post(create_trip))
        .route(
            "/api/trips/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
}

fn trip_not_found() -> AppError {
    AppError::NotFound("Trip not found".to_string())
}

async fn list_trips(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): QueryParams<UserQuery>,
) -> Result<Json<Vec<Trip>>> {
    Ok(Json(state.db.list_trips_for_user(query.user_id).await))
}

async fn get_trip(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<Trip>> {
    state.db.get_trip(id).await.map(Json).ok_or_else(trip_not_found)
}

async fn create_trip(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertTrip>,
) -> Result<(StatusCode, Json<Trip>)> {
    payload.validate()?;
    let trip = state.db.create_trip(payload).await;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(update), _): JsonBody<TripUpdate>,
) -> Result<Json<Trip>> {
    update.validate()?;
    let trip = state
        .db
        .update_trip(id, update)
        .await?
        .ok_or_else(trip_not_found)?;
    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
) -> Result<StatusCode> {
    if state.db.delete_trip(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(trip_not_found())
    }
}
