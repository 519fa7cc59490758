// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Stored format: `pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>`.
//! The iteration count travels with each hash, so raising
//! `PASSWORD_HASH_ITERATIONS` does not invalidate existing accounts.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context};
use base64::{engine::general_purpose::STANDARD_NO_PAD as BASE64, Engine as _};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::AppError;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = ring::digest::SHA256_OUTPUT_LEN;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("hash iterations must be non-zero")]
    ZeroIterations,

    #[error("failed to generate password salt")]
    Salt,

    #[error("password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(err.into())
    }
}

/// Hashes and verifies passwords.
///
/// Hashing is CPU-bound; callers on the async runtime should go through
/// [`PasswordHasher::hash_blocking`] and [`PasswordHasher::verify_blocking`].
#[derive(Clone)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
    rng: SystemRandom,
    /// Verified against when a login names an unknown email
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Result<Self, PasswordError> {
        let iterations = NonZeroU32::new(iterations).ok_or(PasswordError::ZeroIterations)?;
        let mut hasher = Self {
            iterations,
            rng: SystemRandom::new(),
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash("athlete-travel-dummy-password")?;
        Ok(hasher)
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt).map_err(|_| PasswordError::Salt)?;

        let mut hash = [0u8; HASH_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            self.iterations,
            &salt,
            password.as_bytes(),
            &mut hash,
        );

        Ok(format!(
            "{SCHEME}${}${}${}",
            self.iterations,
            BASE64.encode(salt),
            BASE64.encode(hash)
        ))
    }

    /// Constant-time check of `password` against a stored hash.
    ///
    /// A malformed stored hash never matches.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match parse_stored(stored) {
            Ok((iterations, salt, hash)) => {
                pbkdf2::verify(
                    pbkdf2::PBKDF2_HMAC_SHA256,
                    iterations,
                    &salt,
                    password.as_bytes(),
                    &hash,
                )
                .is_ok()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable password hash");
                false
            }
        }
    }

    /// Burn the same work as a real verification, then fail.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }

    pub async fn hash_blocking(&self, password: String) -> Result<String, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    /// Verify on the blocking pool. `None` as the stored hash runs the
    /// dummy verification.
    pub async fn verify_blocking(
        &self,
        password: String,
        stored: Option<String>,
    ) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        let ok = tokio::task::spawn_blocking(move || match stored {
            Some(stored) => hasher.verify(&password, &stored),
            None => hasher.verify_dummy(&password),
        })
        .await?;
        Ok(ok)
    }
}

fn parse_stored(stored: &str) -> anyhow::Result<(NonZeroU32, Vec<u8>, Vec<u8>)> {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(anyhow!("expected 4 fields"));
    };

    if scheme != SCHEME {
        return Err(anyhow!("unknown scheme {scheme}"));
    }
    let iterations: NonZeroU32 = iterations.parse().context("bad iteration count")?;
    let salt = BASE64.decode(salt).context("bad salt")?;
    let hash = BASE64.decode(hash).context("bad hash")?;
    Ok((iterations, salt, hash))
}
