//! Refresh session persistence contract.

use async_trait::async_trait;

use portal_core::AppResult;

use super::model::RefreshTokenRecord;

/// Durable refresh-token storage.
///
/// `revoke_if_active` is an atomic compare-and-set on the `revoked` flag:
/// for any fingerprint at most one caller ever gets `Ok(())`, every other
/// caller (and any caller naming an unknown fingerprint) gets `NotFound`.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Persist a new refresh record.
    async fn insert_refresh_record(&self, record: &RefreshTokenRecord) -> AppResult<()>;

    /// Flip `revoked` from false to true for this fingerprint.
    async fn revoke_if_active(&self, token_hash: &str) -> AppResult<()>;
}
