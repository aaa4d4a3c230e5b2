//! Refresh token record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted refresh session.
///
/// Only the SHA-256 fingerprint of the refresh token is stored. Once
/// `revoked` is set it is never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRecord {
    /// Unique record identifier (UUIDv7).
    pub id: Uuid,
    /// Owner of the session.
    pub user_id: Uuid,
    /// Hex SHA-256 of the raw refresh token.
    pub token_hash: String,
    /// When the refresh token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Whether the token has been used or logged out.
    pub revoked: bool,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Build a fresh, unrevoked record.
    pub fn new(id: Uuid, user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            token_hash,
            expires_at,
            revoked: false,
            created_at: Utc::now(),
        }
    }
}
