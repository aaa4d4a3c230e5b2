//! Issued token pair.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Access and refresh tokens handed to a client after login or refresh.
///
/// Serializing a pair never emits the refresh token; the transport layer
/// reads [`TokenPair::refresh_token`] and delivers it out of band (an
/// HttpOnly cookie, for instance).
#[derive(Clone, Serialize)]
pub struct TokenPair {
    /// Signed access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Signed refresh token.
    #[serde(skip_serializing)]
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_expires_at", &self.access_expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .finish_non_exhaustive()
    }
}
