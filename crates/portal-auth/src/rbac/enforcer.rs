//! Authorization gate: a caller may act on a resource they own, and
//! privileged roles may act on any resource.

use uuid::Uuid;

use portal_core::error::AppError;

use crate::context::RequestContext;

/// Operations a caller can attempt on a user-owned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch one resource.
    Read,
    /// Modify one resource.
    Update,
    /// Remove one resource.
    Delete,
    /// Enumerate resources. Never denied; see [`RbacEnforcer::list_scope`].
    List,
}

/// Which resources a `List` may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every resource.
    All,
    /// Only resources owned by this user.
    OnlySelf(Uuid),
}

/// Enforces self-or-privileged access. Performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Returns `Ok(())` if `caller` may perform `op` on a resource owned by
    /// `owner`, or `Err(AppError::Forbidden)` otherwise.
    pub fn authorize(
        &self,
        owner: Uuid,
        caller: &RequestContext,
        op: Operation,
    ) -> Result<(), AppError> {
        if op == Operation::List || caller.user_id == owner || caller.is_privileged() {
            return Ok(());
        }

        tracing::debug!(
            caller = %caller.user_id,
            owner = %owner,
            operation = ?op,
            "Authorization denied"
        );
        Err(AppError::forbidden(format!(
            "Role '{}' may not {op:?} resources of other users",
            caller.role
        )))
    }

    /// Scope of a `List` for this caller.
    pub fn list_scope(&self, caller: &RequestContext) -> ListScope {
        if caller.is_privileged() {
            ListScope::All
        } else {
            ListScope::OnlySelf(caller.user_id)
        }
    }
}
