//! # Authentication Routes
//!
//! - `POST /auth/login`           — exchange credentials for a session
//! - `POST /auth/signup`          — register; confirmation arrives by e-mail
//! - `GET  /auth/sign-up-success` — post-registration landing message
//! - `POST /auth/forgot-password` — request a reset link
//! - `POST /auth/logout`          — revoke the current session
//! - `GET  /protected`            — session-aware entry dispatch
//!
//! The signup handler validates the password confirmation before anything
//! touches the network; a mismatch never costs a round trip.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use aisle_client::{Credentials, Session};
use aisle_core::ValidationError;

use crate::error::AppError;
use crate::extract::{bearer_token, CurrentUser, Json};
use crate::state::AppState;

/// Where the confirmation link in the signup e-mail lands.
const SIGNUP_REDIRECT: &str = "/protected";
/// Where the reset link in the recovery e-mail lands.
const RESET_REDIRECT: &str = "/auth/update-password";

/// Assemble the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/sign-up-success", get(sign_up_success))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/logout", post(logout))
        .route("/protected", get(protected))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SignupRequest {
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub next: String,
}

#[derive(Debug, Deserialize)]
struct ForgotPasswordRequest {
    email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Where the client should send the user next.
#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub next: String,
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Session>, AppError> {
    let credentials = Credentials::new(request.email, request.password);
    let session = state.identity.sign_in(&credentials).await?;
    Ok(Json(session))
}

async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    if request.password != request.confirm_password {
        return Err(ValidationError::PasswordMismatch.into());
    }
    if request.email.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: "email".to_string(),
        }
        .into());
    }
    if request.password.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "password".to_string(),
        }
        .into());
    }

    let credentials = Credentials::new(request.email, request.password);
    state.identity.sign_up(&credentials, SIGNUP_REDIRECT).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            next: "/auth/sign-up-success".to_string(),
        }),
    ))
}

async fn sign_up_success() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Check your email to confirm your account before signing in.".to_string(),
    })
}

async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .identity
        .request_password_reset(&request.email, RESET_REDIRECT)
        .await?;
    // Same reply whether or not the account exists.
    Ok(Json(MessageResponse {
        message: "If an account exists for that address, a reset link is on its way.".to_string(),
    }))
}

async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.identity.sign_out(&current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Entry dispatch: no session goes to login, a session without a profile
/// goes to onboarding, and a session with a profile goes home.
async fn protected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RedirectResponse>, AppError> {
    let Some(token) = bearer_token(&headers) else {
        return Ok(redirect("/login"));
    };
    let user = match state.identity.current_user(&token).await {
        Ok(user) => user,
        Err(err) if err.is_auth_failure() => return Ok(redirect("/login")),
        Err(err) => return Err(err.into()),
    };
    match state.load_profile(user.id).await? {
        Some(_) => Ok(redirect("/home")),
        None => Ok(redirect("/wedding-assistant")),
    }
}

fn redirect(next: &str) -> Json<RedirectResponse> {
    Json(RedirectResponse {
        next: next.to_string(),
    })
}
