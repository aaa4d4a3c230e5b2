//! Caller identity derived from verified tokens.
//!
//! Built by [`crate::SessionManager::authenticate`] and
//! [`crate::SessionManager::authenticate_refresh`] and passed explicitly into
//! every operation that needs to know *who* is acting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_entity::user::Role;

use crate::jwt::Claims;

/// Context for a request carrying a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: Role,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns whether the caller may act on other users' resources.
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}

impl From<&Claims> for RequestContext {
    fn from(claims: &Claims) -> Self {
        Self::new(claims.user_id, claims.role)
    }
}

/// Context for a refresh request.
///
/// `presented_token` is the raw refresh token the client sent; when present
/// it is revoked before a new pair is issued.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshContext {
    /// The user the refresh token was issued to.
    pub user_id: Uuid,
    /// Role carried by the refresh token.
    pub role: Role,
    /// The raw refresh token, if one was presented.
    pub presented_token: Option<String>,
}

impl RefreshContext {
    /// Creates a new refresh context.
    pub fn new(user_id: Uuid, role: Role, presented_token: Option<String>) -> Self {
        Self {
            user_id,
            role,
            presented_token,
        }
    }
}

impl std::fmt::Debug for RefreshContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshContext")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("presented_token", &self.presented_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
