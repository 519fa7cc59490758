// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session authentication.

use crate::config::MAX_SESSION_TTL_HOURS;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "athlete_travel_token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: u64,
}

/// Middleware that requires valid JWT authentication.
///
/// The token is read from the session cookie, falling back to an
/// `Authorization: Bearer` header. The user must still exist.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.to_string(),
            None => return Err(AppError::Unauthorized),
        }
    };

    let user_id = verify_jwt(&token, &state.config.jwt_signing_key)?;

    if state.db.get_user(user_id).await.is_none() {
        tracing::debug!(user_id, "Session token for unknown user");
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Decode a session token and return its user ID.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Result<u64, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::Unauthorized
    })?;

    token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized)
}

/// Create a JWT for a user session.
///
/// Fails rather than wrapping when the expiry does not fit in a timestamp.
pub fn create_jwt(user_id: u64, signing_key: &[u8], ttl_hours: u64) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = usize::try_from(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())?;
    let exp = ttl_hours
        .checked_mul(60 * 60)
        .and_then(|secs| usize::try_from(secs).ok())
        .and_then(|secs| now.checked_add(secs))
        .ok_or_else(|| anyhow::anyhow!("session TTL of {} hours is out of range", ttl_hours))?;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Session cookie carrying `token`.
///
/// `Secure` is set unless the frontend is served over plain HTTP. Max-Age
/// is capped at [`MAX_SESSION_TTL_HOURS`].
pub fn session_cookie(token: String, frontend_url: &str, ttl_hours: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(frontend_url.starts_with("https://"))
        .max_age(time::Duration::hours(
            ttl_hours.min(MAX_SESSION_TTL_HOURS) as i64,
        ))
        .build()
}

/// Cookie that clears the session; attributes match [`session_cookie`].
pub fn removal_cookie(frontend_url: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(frontend_url.starts_with("https://"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!!";

    #[test]
    fn test_jwt_roundtrip() {
        let token = create_jwt(42, KEY, 1).unwrap();
        assert_eq!(verify_jwt(&token, KEY).unwrap(), 42);
    }

    #[test]
    fn test_jwt_wrong_key() {
        let token = create_jwt(42, KEY, 1).unwrap();
        assert!(verify_jwt(&token, b"another_key_that_is_32_bytes!!!!").is_err());
    }

    #[test]
    fn test_jwt_ttl_overflow_is_an_error() {
        assert!(create_jwt(42, KEY, u64::MAX).is_err());
        assert!(create_jwt(42, KEY, u64::MAX / 1000).is_err());

        let token = create_jwt(42, KEY, MAX_SESSION_TTL_HOURS).unwrap();
        assert_eq!(verify_jwt(&token, KEY).unwrap(), 42);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc".to_string(), "https://athletetravel.app", 24).to_string();
        assert!(cookie.starts_with("athlete_travel_token=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=86400"));

        let local = session_cookie("abc".to_string(), "http://localhost:5173", 24).to_string();
        assert!(!local.contains("Secure"));

        let capped = session_cookie("abc".to_string(), "http://localhost:5173", u64::MAX).to_string();
        assert!(capped.contains(&format!("Max-Age={}", MAX_SESSION_TTL_HOURS * 3600)));
    }
}
