//! Route modules, one per page of the application.

pub mod assistant;
pub mod auth;
pub mod budget;
pub mod checklist;
pub mod guests;
pub mod home;
pub mod vendors;

use serde::Deserialize;

/// Query string for destructive endpoints. Deletion goes through only
/// when the client has already collected the user's confirmation.
#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}
