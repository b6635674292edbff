//! Request extractors.

use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use aisle_client::AuthUser;
use aisle_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// `axum::Json` with its rejection folded into [`AppError`], so malformed
/// or out-of-range request bodies come back as the same structured 422 as
/// any other validation failure instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// The authenticated user behind the request's bearer token.
///
/// Extraction fails with 401 (and the login redirect in the body) when the
/// header is missing, malformed, or the token does not resolve to a user.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: AuthUser,
    /// The raw bearer token, kept for calls that act on the session itself.
    pub token: String,
}

impl CurrentUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }
}

/// Pull the bearer token out of the Authorization header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;
        let user = state.identity.current_user(&token).await?;
        Ok(Self { user, token })
    }
}
