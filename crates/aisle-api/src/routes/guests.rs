//! # Guest List Routes
//!
//! - `GET    /guests`                   — guests newest-first, with RSVP counts
//! - `POST   /guests`                   — add a guest
//! - `PATCH  /guests/:id`               — edit guest fields
//! - `DELETE /guests/:id?confirm=true`  — remove a guest

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use aisle_core::{Guest, GuestCounts, RecordId, RsvpStatus};
use aisle_sync::{CollectionStatus, ResourceController};

use crate::error::AppError;
use crate::extract::{CurrentUser, Json};
use crate::routes::ConfirmQuery;
use crate::state::AppState;

/// Assemble the guest list router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/guests", get(guests))
        .route("/guests", post(create_guest))
        .route(
            "/guests/:id",
            axum::routing::patch(update_guest).delete(delete_guest),
        )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuestsResponse {
    pub status: CollectionStatus,
    pub guests: Vec<Guest>,
    pub counts: GuestCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateGuestRequest {
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    plus_one: bool,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Deserialize)]
struct UpdateGuestRequest {
    name: Option<String>,
    email: Option<String>,
    rsvp_status: Option<RsvpStatus>,
    plus_one: Option<bool>,
    meal_choice: Option<String>,
}

async fn guests(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Json<GuestsResponse> {
    let mut controller = ResourceController::guests(state.store.clone(), current.id());
    let _ = controller.initialize().await;

    Json(GuestsResponse {
        status: controller.status(),
        counts: GuestCounts::of(controller.records()),
        guests: controller.records().to_vec(),
        error: controller.load_error().map(str::to_string),
    })
}

async fn create_guest(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<Guest>), AppError> {
    Guest::validate(&request.name)?;
    let mut guest = Guest::new(current.id(), request.name.trim(), request.email.trim());
    guest.plus_one = request.plus_one;

    let mut controller = ResourceController::guests(state.store.clone(), current.id());
    let stored = controller.create(guest).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update_guest(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateGuestRequest>,
) -> Result<Json<Guest>, AppError> {
    let mut patch = Map::new();
    if let Some(name) = request.name {
        Guest::validate(&name)?;
        patch.insert("name".to_string(), Value::String(name.trim().to_string()));
    }
    if let Some(email) = request.email {
        patch.insert("email".to_string(), Value::String(email.trim().to_string()));
    }
    if let Some(status) = request.rsvp_status {
        patch.insert(
            "rsvp_status".to_string(),
            serde_json::to_value(status)
                .map_err(|e| AppError::Internal(format!("status encode: {e}")))?,
        );
    }
    if let Some(plus_one) = request.plus_one {
        patch.insert("plus_one".to_string(), Value::Bool(plus_one));
    }
    if let Some(meal_choice) = request.meal_choice {
        patch.insert("meal_choice".to_string(), Value::String(meal_choice));
    }
    if patch.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }

    let mut controller = ResourceController::guests(state.store.clone(), current.id());
    let guest = controller.update(&RecordId(id), Value::Object(patch)).await?;
    Ok(Json(guest))
}

async fn delete_guest(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ConfirmQuery>,
) -> Result<StatusCode, AppError> {
    if !query.confirm {
        return Err(AppError::Validation(
            "deletion requires confirm=true".to_string(),
        ));
    }
    let mut controller = ResourceController::guests(state.store.clone(), current.id());
    controller.destroy(&RecordId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
