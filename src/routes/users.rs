// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile routes.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use validator::Validate;

use super::{IdPath, JsonBody};
use crate::error::{AppError, Result};
use crate::models::{User, UserUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/{id}", get(get_user).put(update_user))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<User>> {
    state
        .db
        .get_user(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Partial profile update. A supplied password is re-hashed.
async fn update_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(mut update), _): JsonBody<UserUpdate>,
) -> Result<Json<User>> {
    update.validate()?;

    if state.db.get_user(id).await.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let password_hash = match update.password.take() {
        Some(password) => Some(state.passwords.hash_blocking(password).await?),
        None => None,
    };

    let user = state
        .db
        .update_user(id, update, password_hash)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = id, "User profile updated");
    Ok(Json(user))
}
