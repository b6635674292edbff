//! # Wedding Profile and Countdown
//!
//! Exactly one profile exists per owner. It is written once by the
//! onboarding assistant and read-mostly afterward; the home page derives
//! the countdown from its wedding date on every render.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{RecordId, UserId};
use crate::temporal::Timestamp;

/// The couple's planning profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: UserId,
    /// The owner's display name.
    pub name: String,
    /// The partner's display name.
    pub spouse_name: String,
    /// The big day.
    pub wedding_date: NaiveDate,
    /// Estimated total budget in the couple's currency.
    pub budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Profile {
    /// A new unsaved profile.
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        spouse_name: impl Into<String>,
        wedding_date: NaiveDate,
        budget: f64,
    ) -> Self {
        Self {
            id: None,
            user_id: owner,
            name: name.into(),
            spouse_name: spouse_name.into(),
            wedding_date,
            budget,
            created_at: None,
            updated_at: None,
        }
    }

    /// Validate onboarding input before it is written.
    pub fn validate(name: &str, spouse_name: &str, budget: f64) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "name".to_string(),
            });
        }
        if spouse_name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "spouse_name".to_string(),
            });
        }
        if budget < 0.0 || !budget.is_finite() {
            return Err(ValidationError::NegativeAmount {
                field: "budget".to_string(),
                value: budget,
            });
        }
        Ok(())
    }

    /// Countdown from `now` to midnight UTC on the wedding date,
    /// saturating at zero once the day has arrived.
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        let wedding_moment = self
            .wedding_date
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        Countdown::between(now, wedding_moment)
    }
}

// ─── Countdown ──────────────────────────────────────────────────────

/// Time remaining until the wedding, broken into display components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Component breakdown of `target - now`, clamped to zero when the
    /// target is in the past.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        let remaining = (target - now).num_seconds().max(0);
        Self {
            days: remaining / 86_400,
            hours: remaining / 3_600 % 24,
            minutes: remaining / 60 % 60,
            seconds: remaining % 60,
        }
    }

    /// Whether the target moment has passed.
    pub fn is_past(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
