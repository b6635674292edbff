//! # Checklist Routes
//!
//! - `GET  /checklist`                        — tasks grouped by phase, with progress
//! - `POST /checklist/tasks/:task_key/toggle` — optimistic completion toggle
//!
//! The GET degrades instead of failing: a load error still renders, with
//! `status: "error"`, the fallback records, and the error message. Hitting
//! the endpoint again is the user-triggered retry.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use aisle_core::{group_by_category, ChecklistProgress, Task, TaskKey};
use aisle_sync::{CollectionStatus, ResourceController};

use crate::error::AppError;
use crate::extract::{CurrentUser, Json};
use crate::state::AppState;

/// Assemble the checklist router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checklist", get(checklist))
        .route("/checklist/tasks/:task_key/toggle", post(toggle))
}

/// Tasks of one planning phase.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhaseGroup {
    /// Phase label ("12+ Months Out", ..., "Week Of").
    pub category: String,
    /// Phase position, 1 through 7.
    pub phase: u8,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub status: CollectionStatus,
    pub groups: Vec<PhaseGroup>,
    pub progress: ChecklistProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub task_key: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

async fn checklist(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Json<ChecklistResponse> {
    let mut controller = ResourceController::tasks(state.store.clone(), current.id());
    // A failed load still renders; the error rides along in the body.
    let _ = controller.initialize().await;

    let groups = group_by_category(controller.records())
        .into_iter()
        .map(|(category, tasks)| PhaseGroup {
            category: category.label().to_string(),
            phase: category.number(),
            tasks: tasks.into_iter().cloned().collect(),
        })
        .collect();

    Json(ChecklistResponse {
        status: controller.status(),
        progress: ChecklistProgress::of(controller.records()),
        groups,
        error: controller.load_error().map(str::to_string),
        notice: controller.notice().map(str::to_string),
    })
}

async fn toggle(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(task_key): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let mut controller = ResourceController::tasks(state.store.clone(), current.id());
    controller.initialize().await?;

    let key = TaskKey::new(task_key);
    controller.toggle_completion(&key).await?;

    let completed = controller
        .records()
        .iter()
        .find(|t| t.task_key == key)
        .map(|t| t.completed)
        .unwrap_or_default();

    Ok(Json(ToggleResponse {
        task_key: key.to_string(),
        completed,
        notice: controller.notice().map(str::to_string),
    }))
}
