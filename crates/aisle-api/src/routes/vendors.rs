//! # Vendor Routes
//!
//! - `GET    /vendors`                   — vendors newest-first
//! - `POST   /vendors`                   — add a vendor
//! - `PATCH  /vendors/:id`               — edit vendor fields
//! - `DELETE /vendors/:id?confirm=true`  — remove a vendor

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use aisle_core::{RecordId, Vendor, VendorStatus};
use aisle_sync::{CollectionStatus, ResourceController};

use crate::error::AppError;
use crate::extract::{CurrentUser, Json};
use crate::routes::ConfirmQuery;
use crate::state::AppState;

/// Assemble the vendor router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(vendors))
        .route("/vendors", post(create_vendor))
        .route(
            "/vendors/:id",
            axum::routing::patch(update_vendor).delete(delete_vendor),
        )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VendorsResponse {
    pub status: CollectionStatus,
    pub vendors: Vec<Vendor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateVendorRequest {
    name: String,
    service: String,
    contact_person: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    status: Option<VendorStatus>,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Deserialize)]
struct UpdateVendorRequest {
    name: Option<String>,
    service: Option<String>,
    contact_person: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    status: Option<VendorStatus>,
}

async fn vendors(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Json<VendorsResponse> {
    let mut controller = ResourceController::vendors(state.store.clone(), current.id());
    let _ = controller.initialize().await;

    Json(VendorsResponse {
        status: controller.status(),
        vendors: controller.records().to_vec(),
        error: controller.load_error().map(str::to_string),
    })
}

async fn create_vendor(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<CreateVendorRequest>,
) -> Result<(StatusCode, Json<Vendor>), AppError> {
    Vendor::validate(&request.name, &request.service)?;
    let mut vendor = Vendor::new(current.id(), request.name.trim(), request.service.trim());
    vendor.contact_person = request.contact_person;
    vendor.phone = request.phone;
    vendor.email = request.email;
    if let Some(status) = request.status {
        vendor.status = status;
    }

    let mut controller = ResourceController::vendors(state.store.clone(), current.id());
    let stored = controller.create(vendor).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update_vendor(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVendorRequest>,
) -> Result<Json<Vendor>, AppError> {
    let mut patch = Map::new();
    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        patch.insert("name".to_string(), Value::String(name.trim().to_string()));
    }
    if let Some(service) = request.service {
        if service.trim().is_empty() {
            return Err(AppError::Validation("service must not be empty".to_string()));
        }
        patch.insert(
            "service".to_string(),
            Value::String(service.trim().to_string()),
        );
    }
    if let Some(contact_person) = request.contact_person {
        patch.insert("contact_person".to_string(), Value::String(contact_person));
    }
    if let Some(phone) = request.phone {
        patch.insert("phone".to_string(), Value::String(phone));
    }
    if let Some(email) = request.email {
        patch.insert("email".to_string(), Value::String(email));
    }
    if let Some(status) = request.status {
        patch.insert(
            "status".to_string(),
            serde_json::to_value(status)
                .map_err(|e| AppError::Internal(format!("status encode: {e}")))?,
        );
    }
    if patch.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }

    let mut controller = ResourceController::vendors(state.store.clone(), current.id());
    let vendor = controller.update(&RecordId(id), Value::Object(patch)).await?;
    Ok(Json(vendor))
}

async fn delete_vendor(
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
    let mut controller = ResourceController::vendors(state.store.clone(), current.id());
    controller.destroy(&RecordId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
