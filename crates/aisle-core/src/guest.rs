//! # Guest List
//!
//! Guests carry a closed three-value RSVP enumeration. New guests default
//! to `Pending` and the list is rendered newest-first.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{RecordId, UserId};
use crate::record::{MergeOrder, OwnedRecord};
use crate::temporal::Timestamp;

/// RSVP status of a guest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RsvpStatus {
    /// Confirmed attendance.
    Attending,
    /// Declined the invitation.
    Declined,
    /// No response yet — the default on creation.
    #[default]
    Pending,
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Attending => "Attending",
            Self::Declined => "Declined",
            Self::Pending => "Pending",
        };
        f.write_str(s)
    }
}

/// One invited guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub rsvp_status: RsvpStatus,
    pub plus_one: bool,
    /// Meal choice, `"N/A"` until the guest picks one.
    pub meal_choice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Guest {
    /// A new unsaved guest with the default RSVP state.
    pub fn new(owner: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: Some(owner),
            name: name.into(),
            email: email.into(),
            rsvp_status: RsvpStatus::default(),
            plus_one: false,
            meal_choice: "N/A".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Validate a prospective guest before it is written.
    pub fn validate(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "name".to_string(),
            });
        }
        Ok(())
    }
}

impl OwnedRecord for Guest {
    const TABLE: &'static str = "wedding_guests";
    const MERGE_ORDER: MergeOrder = MergeOrder::Prepend;

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn owner(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    fn set_owner(&mut self, owner: UserId) {
        self.user_id = Some(owner);
    }
}

// ─── Derived Values ─────────────────────────────────────────────────

/// Guest counts by RSVP status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounts {
    pub attending: usize,
    pub declined: usize,
    pub pending: usize,
    pub total: usize,
}

impl GuestCounts {
    /// Count guests by status.
    pub fn of(guests: &[Guest]) -> Self {
        let mut counts = Self::default();
        for guest in guests {
            match guest.rsvp_status {
                RsvpStatus::Attending => counts.attending += 1,
                RsvpStatus::Declined => counts.declined += 1,
                RsvpStatus::Pending => counts.pending += 1,
            }
            counts.total += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_guest_defaults_to_pending() {
        let guest = Guest::new(UserId::new(), "Ada", "ada@example.com");
        assert_eq!(guest.rsvp_status, RsvpStatus::Pending);
        assert!(!guest.plus_one);
        assert_eq!(guest.meal_choice, "N/A");
    }

    #[test]
    fn rsvp_status_serializes_to_exact_labels() {
        assert_eq!(
            serde_json::to_string(&RsvpStatus::Attending).unwrap(),
            "\"Attending\""
        );
        assert_eq!(
            serde_json::to_string(&RsvpStatus::Declined).unwrap(),
            "\"Declined\""
        );
        assert_eq!(
            serde_json::to_string(&RsvpStatus::Pending).unwrap(),
            "\"Pending\""
        );
    }

    #[test]
    fn rsvp_status_rejects_values_outside_the_enumeration() {
        let result: Result<RsvpStatus, _> = serde_json::from_str("\"Maybe\"");
        assert!(result.is_err());
    }

    #[test]
    fn counts_by_status() {
        let owner = UserId::new();
        let mut guests = vec![
            Guest::new(owner, "Ada", "ada@example.com"),
            Guest::new(owner, "Grace", "grace@example.com"),
            Guest::new(owner, "Edsger", "edsger@example.com"),
        ];
        guests[0].rsvp_status = RsvpStatus::Attending;
        guests[1].rsvp_status = RsvpStatus::Declined;

        let counts = GuestCounts::of(&guests);
        assert_eq!(counts.attending, 1);
        assert_eq!(counts.declined, 1);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn blank_name_rejected() {
        assert!(Guest::validate("").is_err());
        assert!(Guest::validate("Ada").is_ok());
    }
}
