//! User persistence contract.

use async_trait::async_trait;
use uuid::Uuid;

use portal_core::AppResult;

use super::model::{NewUser, User, UserCredential};

/// Durable user storage.
///
/// Soft-deleted users are invisible to every lookup; `update_name` and
/// `soft_delete` report them as `Gone` so callers can tell a deleted
/// account from one that never existed (`NotFound`).
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user. A duplicate email yields `AlreadyExists`.
    async fn insert_user(&self, user: &NewUser) -> AppResult<()>;

    /// Credential for an active (not deleted) user with this email.
    async fn find_credential_by_email(&self, email: &str) -> AppResult<Option<UserCredential>>;

    /// Active user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// All active users, oldest first.
    async fn list_active(&self) -> AppResult<Vec<User>>;

    /// Replace both names of an active user.
    async fn update_name(&self, id: Uuid, first_name: &str, last_name: &str) -> AppResult<()>;

    /// Mark a user deleted.
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;
}
