// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side data access: typed API client, query cache and local storage.

pub mod api;
pub mod cache;
pub mod local_store;

pub use api::ApiClient;
pub use cache::{QueryCache, QueryKey};
pub use local_store::LocalStore;

/// Message shown when the server could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Errors returned by [`ApiClient`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error status
    #[error("{status}: {message}")]
    Api { status: u16, message: String },

    /// No response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::Decode(_) => "Unexpected response from the server.".to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let api = ClientError::Api {
            status: 400,
            message: "User already exists".to_string(),
        };
        assert_eq!(api.user_message(), "User already exists");
        assert_eq!(api.status(), Some(400));

        let network = ClientError::Network("connection refused".to_string());
        assert_eq!(network.user_message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(network.status(), None);
    }
}
