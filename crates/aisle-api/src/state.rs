//! Shared application state.

use std::sync::Arc;

use serde_json::Value;

use aisle_client::{Filter, IdentityService, RecordStore};
use aisle_core::{Profile, UserId};

use crate::error::AppError;

/// Handles to the external services, shared by every handler. Cheap to
/// clone; both services sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityService>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityService>, store: Arc<dyn RecordStore>) -> Self {
        Self { identity, store }
    }

    /// Load the owner's profile, if onboarding has been completed.
    pub async fn load_profile(&self, owner: UserId) -> Result<Option<Profile>, AppError> {
        let rows = self
            .store
            .select("profiles", &Filter::new().eq("user_id", owner), None)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;
        match rows.into_iter().next() {
            Some(row) => {
                let profile = serde_json::from_value(row)
                    .map_err(|e| AppError::Internal(format!("bad profile row: {e}")))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Write the owner's profile, inserting on first save and patching on
    /// every save after that. Exactly one profile row exists per owner.
    pub async fn save_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        let row = serde_json::to_value(profile)
            .map_err(|e| AppError::Internal(format!("profile encode: {e}")))?;
        let filter = Filter::new().eq("user_id", profile.user_id);

        let existing = self
            .store
            .select("profiles", &filter, None)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let stored = if existing.is_empty() {
            self.store
                .insert("profiles", vec![row])
                .await
                .map_err(|e| AppError::Upstream(e.to_string()))?
        } else {
            let patch = strip_identity_columns(row);
            self.store
                .update("profiles", &filter, patch)
                .await
                .map_err(|e| AppError::Upstream(e.to_string()))?
        };

        stored
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Upstream("store returned no profile row".to_string()))
            .and_then(|row| {
                serde_json::from_value(row)
                    .map_err(|e| AppError::Internal(format!("bad profile row: {e}")))
            })
    }
}

/// A profile patch must never rewrite the row's identity columns.
fn strip_identity_columns(mut row: Value) -> Value {
    if let Some(object) = row.as_object_mut() {
        object.remove("id");
        object.remove("user_id");
        object.remove("created_at");
    }
    row
}
