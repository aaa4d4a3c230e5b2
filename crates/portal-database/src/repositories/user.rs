//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_entity::user::{NewUser, User, UserCredential, UserStore};

/// Columns selected for [`User`].
const USER_COLUMNS: &str = "id, first_name, last_name, email, role, created_at, updated_at";

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves a failed conditional update into `NotFound` or `Gone`.
    async fn missing_or_deleted(&self, id: Uuid) -> AppError {
        let deleted = sqlx::query_scalar::<_, bool>("SELECT is_deleted FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;

        match deleted {
            Ok(Some(true)) => AppError::gone("user already deleted"),
            Ok(Some(false)) => AppError::internal("user row changed during update"),
            Ok(None) => AppError::not_found("user not found"),
            Err(e) => AppError::internal_from("Failed to look up user", e),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert_user(&self, user: &NewUser) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                AppError::already_exists("user already exists")
            } else {
                AppError::internal_from("Failed to insert user", e)
            }
        })?;

        Ok(())
    }

    async fn find_credential_by_email(&self, email: &str) -> AppResult<Option<UserCredential>> {
        sqlx::query_as::<_, UserCredential>(
            "SELECT id, password_hash, role FROM users WHERE email = $1 AND is_deleted = FALSE",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::internal_from("Failed to find credential by email", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::internal_from("Failed to find user by id", e))
    }

    async fn list_active(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_deleted = FALSE ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::internal_from("Failed to list users", e))
    }

    async fn update_name(&self, id: Uuid, first_name: &str, last_name: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, updated_at = NOW()
            WHERE id = $3 AND is_deleted = FALSE
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::internal_from("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(self.missing_or_deleted(id).await);
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::internal_from("Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(self.missing_or_deleted(id).await);
        }
        Ok(())
    }
}
