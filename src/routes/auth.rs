// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and session routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::JsonBody;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, removal_cookie, session_cookie, AuthUser};
use crate::models::{InsertUser, User};
use crate::AppState;

/// Routes reachable without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Routes that need a session; the auth middleware is applied in routes/mod.rs.
pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub user: User,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<InsertUser>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;

    let password_hash = state
        .passwords
        .hash_blocking(payload.password.clone())
        .await?;
    let user = state.db.create_user(payload, password_hash).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user })))
}

/// Check credentials and start a session.
///
/// An unknown email still pays for a full hash verification, so response
/// timing does not reveal which emails are registered.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(payload), _): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    payload.validate()?;

    let user = state.db.find_user_by_email(&payload.email).await;
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let verified = state
        .passwords
        .verify_blocking(payload.password, stored)
        .await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!("Failed login attempt");
            return Err(AppError::Unauthorized);
        }
    };

    let ttl = state.config.session_ttl_hours;
    let token = create_jwt(user.id, &state.config.jwt_signing_key, ttl)?;

    let user = state
        .db
        .set_user_authenticated(user.id, true)
        .await
        .ok_or(AppError::Unauthorized)?;

    let jar = jar.add(session_cookie(
        token.clone(),
        &state.config.frontend_url,
        ttl,
    ));

    tracing::info!(user_id = user.id, "User logged in");
    Ok((jar, Json(LoginResponse { user, token })))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    state.db.set_user_authenticated(auth.user_id, false).await;
    tracing::info!(user_id = auth.user_id, "User logged out");

    let jar = jar.remove(removal_cookie(&state.config.frontend_url));
    (jar, StatusCode::NO_CONTENT)
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<User>> {
    let user = state
        .db
        .get_user(auth.user_id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}
