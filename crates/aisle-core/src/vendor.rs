//! # Vendors
//!
//! Vendors carry a closed four-value booking status. New vendors default
//! to `Researching`; contact fields are optional.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{RecordId, UserId};
use crate::record::{MergeOrder, OwnedRecord};
use crate::temporal::Timestamp;

/// Booking status of a vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorStatus {
    /// Contract signed.
    Booked,
    /// Waiting on the vendor.
    Pending,
    /// Initial contact made.
    Contacted,
    /// Still comparing options — the default on creation.
    #[default]
    Researching,
}

impl std::fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Booked => "Booked",
            Self::Pending => "Pending",
            Self::Contacted => "Contacted",
            Self::Researching => "Researching",
        };
        f.write_str(s)
    }
}

/// One vendor under consideration or booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub name: String,
    /// Service category ("Photography", "Catering", ...).
    pub service: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: VendorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Vendor {
    /// A new unsaved vendor with the default status and no contact details.
    pub fn new(owner: UserId, name: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: Some(owner),
            name: name.into(),
            service: service.into(),
            contact_person: None,
            phone: None,
            email: None,
            status: VendorStatus::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Validate a prospective vendor before it is written.
    pub fn validate(name: &str, service: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "name".to_string(),
            });
        }
        if service.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "service".to_string(),
            });
        }
        Ok(())
    }
}

impl OwnedRecord for Vendor {
    const TABLE: &'static str = "vendors";
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vendor_defaults_to_researching() {
        let vendor = Vendor::new(UserId::new(), "Bloom & Co", "Flowers");
        assert_eq!(vendor.status, VendorStatus::Researching);
        assert!(vendor.contact_person.is_none());
    }

    #[test]
    fn status_rejects_values_outside_the_enumeration() {
        let result: Result<VendorStatus, _> = serde_json::from_str("\"Ghosted\"");
        assert!(result.is_err());
    }

    #[test]
    fn vendor_roundtrips_with_null_contact_fields() {
        let row = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "user_id": uuid::Uuid::new_v4(),
            "name": "Bloom & Co",
            "service": "Flowers",
            "contact_person": null,
            "phone": null,
            "email": null,
            "status": "Contacted"
        });
        let vendor: Vendor = serde_json::from_value(row).unwrap();
        assert_eq!(vendor.status, VendorStatus::Contacted);
        assert!(vendor.phone.is_none());
    }

    #[test]
    fn blank_name_or_service_rejected() {
        assert!(Vendor::validate("", "Flowers").is_err());
        assert!(Vendor::validate("Bloom & Co", " ").is_err());
        assert!(Vendor::validate("Bloom & Co", "Flowers").is_ok());
    }
}
