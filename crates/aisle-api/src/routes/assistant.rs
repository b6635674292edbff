//! # Wedding Assistant Routes
//!
//! The onboarding conversation that produces the profile:
//!
//! - `GET  /wedding-assistant` — the assistant's question sequence
//! - `POST /wedding-assistant` — save the answers as the owner's profile
//!
//! Saving again overwrites the previous answers; there is never more than
//! one profile row per owner.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use aisle_core::Profile;

use crate::error::AppError;
use crate::extract::{CurrentUser, Json};
use crate::state::AppState;

/// Assemble the assistant router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wedding-assistant", get(prompts))
        .route("/wedding-assistant", post(save_profile))
}

/// One step of the onboarding conversation.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantStep {
    pub field: String,
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantPrompts {
    pub steps: Vec<AssistantStep>,
}

#[derive(Debug, Deserialize)]
struct ProfileRequest {
    name: String,
    spouse_name: String,
    wedding_date: NaiveDate,
    budget: f64,
}

async fn prompts() -> Json<AssistantPrompts> {
    let step = |field: &str, prompt: &str| AssistantStep {
        field: field.to_string(),
        prompt: prompt.to_string(),
    };
    Json(AssistantPrompts {
        steps: vec![
            step("name", "First things first — what's your name?"),
            step("spouse_name", "And who's the lucky person you're marrying?"),
            step("wedding_date", "When is the big day?"),
            step("budget", "What's your estimated budget for the wedding?"),
        ],
    })
}

async fn save_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<ProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    Profile::validate(&request.name, &request.spouse_name, request.budget)?;
    let profile = Profile::new(
        current.id(),
        request.name.trim(),
        request.spouse_name.trim(),
        request.wedding_date,
        request.budget,
    );
    let stored = state.save_profile(&profile).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}
