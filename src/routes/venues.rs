// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Accommodation and training facility routes.

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

use super::events::non_empty;
use super::{IdPath, JsonBody, QueryParams};
use crate::error::{AppError, Result};
use crate::models::{
    Accommodation, AccommodationFilter, FacilityFilter, InsertAccommodation,
    InsertTrainingFacility, TrainingFacility,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/accommodations",
            get(list_accommodations).post(create_accommodation),
        )
        .route("/api/accommodations/{id}", get(get_accommodation))
        .route(
            "/api/training-facilities",
            get(list_training_facilities).post(create_training_facility),
        )
        .route("/api/training-facilities/{id}", get(get_training_facility))
}

// ─── Accommodations ──────────────────────────────────────────

async fn list_accommodations(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(filter), _): QueryParams<AccommodationFilter>,
) -> Result<Json<Vec<Accommodation>>> {
    let filter = AccommodationFilter {
        city: non_empty(filter.city),
        accommodation_type: non_empty(filter.accommodation_type),
        max_price: filter.max_price,
    };
    Ok(Json(state.db.list_accommodations(&filter).await))
}

async fn get_accommodation(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<Accommodation>> {
    state
        .db
        .get_accommodation(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Accommodation not found".to_string()))
}

async fn create_accommodation(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertAccommodation>,
) -> Result<(StatusCode, Json<Accommodation>)> {
    payload.validate()?;
    let accommodation = state.db.create_accommodation(payload).await;
    Ok((StatusCode::CREATED, Json(accommodation)))
}

// ─── Training Facilities ─────────────────────────────────────

/// Query parameters for facility search.
#[derive(Debug, Deserialize)]
pub struct FacilityQuery {
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    /// Comma-separated sports; any match qualifies
    pub sports: Option<String>,
}

async fn list_training_facilities(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): QueryParams<FacilityQuery>,
) -> Result<Json<Vec<TrainingFacility>>> {
    let filter = FacilityFilter::new(
        non_empty(query.city),
        non_empty(query.facility_type),
        query.sports.as_deref(),
    );
    Ok(Json(state.db.list_training_facilities(&filter).await))
}

async fn get_training_facility(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<TrainingFacility>> {
    state
        .db
        .get_training_facility(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Training facility not found".to_string()))
}

async fn create_training_facility(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertTrainingFacility>,
) -> Result<(StatusCode, Json<TrainingFacility>)> {
    payload.validate()?;
    let facility = state.db.create_training_facility(payload).await;
    Ok((StatusCode::CREATED, Json(facility)))
}
