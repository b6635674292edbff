//! Client error types for the identity and record store services.

use thiserror::Error;

/// Errors from the identity/session service.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Sign-in rejected (wrong e-mail or password, unconfirmed account).
    #[error("sign-in failed: {detail}")]
    InvalidCredentials {
        /// Service-provided detail, safe to show to the user.
        detail: String,
    },

    /// No valid session — the bearer token is missing, expired, or revoked.
    /// Callers redirect to the login flow on this variant.
    #[error("no valid session: {detail}")]
    Unauthenticated {
        /// What was wrong with the token.
        detail: String,
    },

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The identity service returned an unexpected non-2xx status.
    #[error("identity service {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl IdentityError {
    /// Whether this failure means "no session" and the caller should
    /// redirect to login rather than surface a service error.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::Unauthenticated { .. }
        )
    }
}

/// Errors from the record store service.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error (includes request timeout expiry).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The store returned a non-2xx status.
    #[error("record store {table} returned {status}: {body}")]
    Api {
        table: String,
        status: u16,
        body: String,
    },

    /// Row deserialization failed.
    #[error("failed to deserialize rows from {table}: {source}")]
    Deserialization {
        table: String,
        source: reqwest::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_classification() {
        let err = IdentityError::Unauthenticated {
            detail: "token expired".to_string(),
        };
        assert!(err.is_auth_failure());

        let err = IdentityError::Api {
            endpoint: "/user".to_string(),
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn store_error_display_names_the_table() {
        let err = StoreError::Api {
            table: "wedding_guests".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };
        assert!(err.to_string().contains("wedding_guests"));
        assert!(err.to_string().contains("503"));
    }
}
