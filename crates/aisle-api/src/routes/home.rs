//! # Home Route
//!
//! `GET /home` — greeting and live countdown, derived from the profile on
//! every request. Nothing here is cached or persisted.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use aisle_core::Countdown;

use crate::error::AppError;
use crate::extract::{CurrentUser, Json};
use crate::state::AppState;

/// Assemble the home router.
pub fn router() -> Router<AppState> {
    Router::new().route("/home", get(home))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub greeting: String,
    pub wedding_date: chrono::NaiveDate,
    pub countdown: Countdown,
    /// True once the wedding day has arrived.
    pub is_past: bool,
}

async fn home(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<HomeResponse>, AppError> {
    let profile = state
        .load_profile(current.id())
        .await?
        .ok_or_else(|| AppError::NotFound("no profile yet — finish the wedding assistant".to_string()))?;

    let countdown = profile.countdown(Utc::now());
    Ok(Json(HomeResponse {
        greeting: format!("Welcome, {} & {}!", profile.name, profile.spouse_name),
        wedding_date: profile.wedding_date,
        is_past: countdown.is_past(),
        countdown,
    }))
}
