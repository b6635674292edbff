//! # Temporal Types
//!
//! `Timestamp` is a UTC-only wall-clock timestamp used for the
//! server-assigned `created_at` / `updated_at` fields on stored rows.
//! External rows may arrive with any RFC 3339 offset; parsing always
//! normalizes to UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap an existing `DateTime<Utc>`.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse an RFC 3339 timestamp, converting any offset to UTC.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| ValidationError::InvalidField {
            field: "timestamp".to_string(),
            detail: format!("invalid RFC 3339 timestamp {s:?}: {e}"),
        })?;
        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as RFC 3339 with Z suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_z_suffix() {
        let ts = Timestamp::parse("2026-05-20T15:00:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-05-20T15:00:00Z");
    }

    #[test]
    fn parse_offset_normalizes_to_utc() {
        let ts = Timestamp::parse("2026-05-20T20:00:00+05:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-05-20T15:00:00Z");
    }

    #[test]
    fn parse_garbage_rejected() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn ordering_follows_time() {
        let earlier = Timestamp::parse("2026-05-20T15:00:00Z").unwrap();
        let later = Timestamp::parse("2026-05-20T15:00:01Z").unwrap();
        assert!(earlier < later);
    }
}
