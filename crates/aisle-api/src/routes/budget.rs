//! # Budget Routes
//!
//! - `GET    /budget`                      — items plus derived summary
//! - `POST   /budget/items`                — add a line item
//! - `PATCH  /budget/items/:id`            — record spending
//! - `DELETE /budget/items/:id?confirm=true` — remove a line item
//!
//! The summary is computed against the estimated budget from the profile;
//! with no profile it falls back to zero and `percent_spent` stays zero.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aisle_core::{BudgetItem, BudgetSummary, RecordId};
use aisle_sync::{CollectionStatus, ResourceController};

use crate::error::AppError;
use crate::extract::{CurrentUser, Json};
use crate::routes::ConfirmQuery;
use crate::state::AppState;

/// Assemble the budget router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/budget", get(budget))
        .route("/budget/items", post(create_item))
        .route(
            "/budget/items/:id",
            axum::routing::patch(update_item).delete(delete_item),
        )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub status: CollectionStatus,
    pub items: Vec<BudgetItem>,
    pub summary: BudgetSummary,
    pub estimated_budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateItemRequest {
    category: String,
    allocated: f64,
}

#[derive(Debug, Deserialize)]
struct UpdateItemRequest {
    spent: f64,
}

async fn budget(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<BudgetResponse>, AppError> {
    let estimated_budget = state
        .load_profile(current.id())
        .await?
        .map(|p| p.budget)
        .unwrap_or(0.0);

    let mut controller = ResourceController::budget_items(state.store.clone(), current.id());
    let _ = controller.initialize().await;

    Ok(Json(BudgetResponse {
        status: controller.status(),
        summary: BudgetSummary::of(controller.records(), estimated_budget),
        items: controller.records().to_vec(),
        estimated_budget,
        error: controller.load_error().map(str::to_string),
    }))
}

async fn create_item(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<BudgetItem>), AppError> {
    BudgetItem::validate(&request.category, request.allocated)?;
    let mut controller = ResourceController::budget_items(state.store.clone(), current.id());
    let item = controller
        .create(BudgetItem::new(
            current.id(),
            request.category.trim(),
            request.allocated,
        ))
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<BudgetItem>, AppError> {
    if request.spent < 0.0 || !request.spent.is_finite() {
        return Err(AppError::Validation(format!(
            "spent must be a non-negative amount, got {}",
            request.spent
        )));
    }
    let mut controller = ResourceController::budget_items(state.store.clone(), current.id());
    let item = controller
        .update(
            &RecordId(id),
            serde_json::json!({ "spent": request.spent }),
        )
        .await?;
    Ok(Json(item))
}

async fn delete_item(
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
    let mut controller = ResourceController::budget_items(state.store.clone(), current.id());
    controller.destroy(&RecordId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
