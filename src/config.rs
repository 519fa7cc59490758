// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Minimum accepted length for the session signing key.
const MIN_SIGNING_KEY_LEN: usize = 32;

/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Populate the store with sample events, accommodations and facilities
    pub seed_sample_data: bool,
    /// PBKDF2 iteration count for new password hashes
    pub password_hash_iterations: u32,
    /// Lifetime of a session token
    pub session_ttl_hours: u64,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Deterministic config for tests.
    ///
    /// Uses a low hash iteration count so auth tests stay fast.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            seed_sample_data: true,
            password_hash_iterations: 1_000,
            session_ttl_hours: 24,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .trim()
            .as_bytes()
            .to_vec();
        if jwt_signing_key.len() < MIN_SIGNING_KEY_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SIGNING_KEY",
                reason: format!("must be at least {} bytes", MIN_SIGNING_KEY_LEN),
            });
        }

        let password_hash_iterations: u32 = parse_var("PASSWORD_HASH_ITERATIONS", 100_000)?;
        if password_hash_iterations == 0 {
            return Err(ConfigError::Invalid {
                name: "PASSWORD_HASH_ITERATIONS",
                reason: "must be greater than 0".to_string(),
            });
        }

        let session_ttl_hours: u64 = parse_var("SESSION_TTL_HOURS", 24 * 30)?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_HOURS",
                reason: format!("must be between 1 and {}", MAX_SESSION_TTL_HOURS),
            });
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_var("PORT", 8080)?,
            seed_sample_data: parse_var("SEED_SAMPLE_DATA", true)?,
            password_hash_iterations,
            session_ttl_hours,
            jwt_signing_key,
        })
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("could not parse {:?}", raw),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-wide, so everything touching them lives in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "short");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid {
                name: "JWT_SIGNING_KEY",
                ..
            })
        ));

        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!!");
        env::set_var("PORT", "9090");
        env::set_var("SEED_SAMPLE_DATA", "false");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert!(!config.seed_sample_data);
        assert_eq!(config.password_hash_iterations, 100_000);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));

        env::remove_var("PORT");
        assert_eq!(Config::from_env().unwrap().session_ttl_hours, 24 * 30);

        for ttl in ["0", "8761", "18446744073709551"] {
            env::set_var("SESSION_TTL_HOURS", ttl);
            assert!(
                matches!(
                    Config::from_env(),
                    Err(ConfigError::Invalid {
                        name: "SESSION_TTL_HOURS",
                        ..
                    })
                ),
                "{ttl}"
            );
        }

        env::set_var("SESSION_TTL_HOURS", "8760");
        assert_eq!(Config::from_env().unwrap().session_ttl_hours, MAX_SESSION_TTL_HOURS);

        env::remove_var("SESSION_TTL_HOURS");
        env::remove_var("SEED_SAMPLE_DATA");
    }
}
