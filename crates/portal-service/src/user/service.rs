//! User resource operations guarded by the self-or-privileged gate.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use portal_auth::rbac::{ListScope, Operation, RbacEnforcer};
use portal_auth::RequestContext;
use portal_core::error::AppError;
use portal_entity::user::{UpdateUser, User, UserStore};
use portal_entity::validation::check;

/// Handles operations on user records on behalf of an authenticated caller.
#[derive(Clone)]
pub struct UserService {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Authorization gate.
    gate: RbacEnforcer,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            gate: RbacEnforcer::new(),
        }
    }

    /// Lists users visible to the caller.
    ///
    /// Privileged callers see every active user; anyone else sees a
    /// one-element list with their own record (empty once deleted).
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        match self.gate.list_scope(ctx) {
            ListScope::All => self.users.list_active().await,
            ListScope::OnlySelf(id) => Ok(self.users.find_by_id(id).await?.into_iter().collect()),
        }
    }

    /// Gets one user.
    pub async fn get_by_id(&self, ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        self.gate.authorize(id, ctx, Operation::Read)?;

        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    /// Replaces both names of a user.
    pub async fn update_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut update: UpdateUser,
    ) -> Result<(), AppError> {
        update.normalize();
        check(&update)?;
        self.gate.authorize(id, ctx, Operation::Update)?;

        let (Some(first_name), Some(last_name)) = (update.first_name, update.last_name) else {
            return Err(AppError::invalid_input("first_name and last_name are required"));
        };

        self.users.update_name(id, &first_name, &last_name).await?;
        info!(user_id = %id, actor = %ctx.user_id, "User renamed");
        Ok(())
    }

    /// Soft-deletes a user. A second delete reports `Gone`.
    pub async fn delete_by_id(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.gate.authorize(id, ctx, Operation::Delete)?;

        self.users.soft_delete(id).await?;
        info!(user_id = %id, actor = %ctx.user_id, "User deleted");
        Ok(())
    }
}
