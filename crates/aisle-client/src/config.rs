//! Client configuration for the hosted services.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default per-request timeout. Finite by design: a hung remote call must
/// become a user-visible failure rather than an indefinite wait.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing environment variable {name}")]
    MissingEnv {
        /// The variable name.
        name: &'static str,
    },

    /// A value could not be parsed.
    #[error("invalid value for {name}: {detail}")]
    InvalidValue {
        /// The setting name.
        name: &'static str,
        /// What was wrong with it.
        detail: String,
    },
}

/// Connection settings for the identity service and the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the identity service (e.g. `https://x.example.co/auth/v1`).
    pub identity_base_url: String,
    /// Base URL of the record store (e.g. `https://x.example.co/rest/v1`).
    pub store_base_url: String,
    /// Project API key sent with every request.
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    /// Build a configuration from `AISLE_*` environment variables.
    ///
    /// Required: `AISLE_IDENTITY_URL`, `AISLE_STORE_URL`, `AISLE_API_KEY`.
    /// Optional: `AISLE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match std::env::var("AISLE_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                name: "AISLE_TIMEOUT_SECS",
                detail: format!("{e}"),
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            identity_base_url: require_env("AISLE_IDENTITY_URL")?,
            store_base_url: require_env("AISLE_STORE_URL")?,
            api_key: require_env("AISLE_API_KEY")?,
            timeout_secs,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnv { name })
}
