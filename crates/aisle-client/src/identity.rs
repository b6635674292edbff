//! # Identity Service Seam
//!
//! Trait interface for the hosted identity/session provider. Aisle never
//! sees authentication internals — token issuance, password hashing, and
//! session cookies all live behind this seam. Implementations must be
//! `Send + Sync` so they can be shared across async tasks behind an `Arc`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use aisle_core::UserId;

use crate::error::IdentityError;

/// The authenticated user behind a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Owner id every record filter is built from.
    pub id: UserId,
    /// The account e-mail.
    pub email: String,
}

/// An issued session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Token type, always `"bearer"` in practice.
    pub token_type: String,
    /// Seconds until expiry, when the service reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// The user the session belongs to.
    pub user: AuthUser,
}

/// Sign-in / sign-up input. The password is held in a zeroizing buffer and
/// wiped when the credentials are dropped; it must never be logged.
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The identity/session provider.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Exchange credentials for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError>;

    /// Register an account. The service e-mails a confirmation link that
    /// lands on `redirect_to`.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> Result<(), IdentityError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    /// Send a password-reset e-mail landing on `redirect_to`.
    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), IdentityError>;

    /// Resolve the user behind a bearer token. Under bearer auth this is
    /// also the session check: an `Unauthenticated` error means no session.
    async fn current_user(&self, access_token: &str) -> Result<AuthUser, IdentityError>;
}
