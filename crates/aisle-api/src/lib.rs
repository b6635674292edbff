//! # aisle-api — Axum JSON API for the Planning Stack
//!
//! HTTP surface over the synchronization layer. Handlers are thin: they
//! authenticate the bearer token, build the owner-scoped controller for
//! the page, and translate its outcome into JSON.
//!
//! ## API Surface
//!
//! | Prefix                 | Module                  | Domain                  |
//! |------------------------|-------------------------|-------------------------|
//! | `/auth/*`, `/protected`| [`routes::auth`]        | Sessions and dispatch   |
//! | `/wedding-assistant`   | [`routes::assistant`]   | Onboarding profile      |
//! | `/home`                | [`routes::home`]        | Greeting and countdown  |
//! | `/checklist/*`         | [`routes::checklist`]   | Phased task checklist   |
//! | `/budget/*`            | [`routes::budget`]      | Budget items + summary  |
//! | `/guests/*`            | [`routes::guests`]      | Guest list + RSVP       |
//! | `/vendors/*`           | [`routes::vendors`]     | Vendor tracking         |
//!
//! Dashboard GETs degrade instead of failing: a store outage renders with
//! `status: "error"` and fallback records rather than a 5xx, and hitting
//! the page again is the retry.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::auth::router())
        .merge(routes::assistant::router())
        .merge(routes::home::router())
        .merge(routes::checklist::router())
        .merge(routes::budget::router())
        .merge(routes::guests::router())
        .merge(routes::vendors::router())
        .route("/health", get(health))
        // 256 KiB is generous for any page in this application.
        .layer(DefaultBodyLimit::max(256 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
