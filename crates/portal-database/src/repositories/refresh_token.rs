//! Refresh token repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_entity::session::{RefreshTokenRecord, SessionStore};

/// PostgreSQL-backed [`SessionStore`].
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn insert_refresh_record(&self, record: &RefreshTokenRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, revoked, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.token_hash)
        .bind(record.expires_at)
        .bind(record.revoked)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::internal_from("Failed to store refresh token", e))?;

        Ok(())
    }

    async fn revoke_if_active(&self, token_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE token_hash = $1 AND revoked = FALSE",
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::internal_from("Failed to revoke refresh token", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("refresh token not found or already revoked"));
        }
        Ok(())
    }
}
