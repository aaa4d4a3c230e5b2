//! In-memory refresh token store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_entity::session::{RefreshTokenRecord, SessionStore};

/// `DashMap`-backed [`SessionStore`] keyed by token fingerprint.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: DashMap<String, RefreshTokenRecord>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the record for a fingerprint.
    pub fn get(&self, token_hash: &str) -> Option<RefreshTokenRecord> {
        self.records.get(token_hash).map(|r| r.value().clone())
    }

    /// Number of stored records, revoked ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert_refresh_record(&self, record: &RefreshTokenRecord) -> AppResult<()> {
        match self.records.entry(record.token_hash.clone()) {
            Entry::Occupied(_) => Err(AppError::internal("duplicate refresh token fingerprint")),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn revoke_if_active(&self, token_hash: &str) -> AppResult<()> {
        // The shard write lock makes the check and the flip one step.
        if let Some(mut record) = self.records.get_mut(token_hash) {
            if !record.revoked {
                record.revoked = true;
                return Ok(());
            }
        }
        Err(AppError::not_found("refresh token not found or already revoked"))
    }
}
