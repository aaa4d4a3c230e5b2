//! In-memory user store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_entity::user::{NewUser, Role, User, UserCredential, UserStore};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
    deleted: bool,
}

/// `DashMap`-backed [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    /// Users by id.
    users: DashMap<Uuid, StoredUser>,
    /// Email → id. Always locked before `users`.
    emails: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change a user's role. Used to provision administrators.
    pub fn set_role(&self, id: Uuid, role: Role) -> AppResult<()> {
        let mut stored = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("user not found"))?;
        stored.user.role = role;
        Ok(())
    }

    fn with_active<T>(&self, id: Uuid, f: impl FnOnce(&mut StoredUser) -> T) -> AppResult<T> {
        let mut stored = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("user not found"))?;
        if stored.deleted {
            return Err(AppError::gone("user already deleted"));
        }
        Ok(f(stored.value_mut()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_user(&self, user: &NewUser) -> AppResult<()> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::already_exists("user already exists")),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                self.users.insert(
                    user.id,
                    StoredUser {
                        user: User {
                            id: user.id,
                            first_name: user.first_name.clone(),
                            last_name: user.last_name.clone(),
                            email: user.email.clone(),
                            role: user.role,
                            created_at: now,
                            updated_at: now,
                        },
                        password_hash: user.password_hash.clone(),
                        deleted: false,
                    },
                );
                slot.insert(user.id);
                Ok(())
            }
        }
    }

    async fn find_credential_by_email(&self, email: &str) -> AppResult<Option<UserCredential>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };

        Ok(self
            .users
            .get(&id)
            .filter(|stored| !stored.deleted)
            .map(|stored| UserCredential {
                id: stored.user.id,
                password_hash: stored.password_hash.clone(),
                role: stored.user.role,
            }))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .get(&id)
            .filter(|stored| !stored.deleted)
            .map(|stored| stored.user.clone()))
    }

    async fn list_active(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| !entry.deleted)
            .map(|entry| entry.user.clone())
            .collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn update_name(&self, id: Uuid, first_name: &str, last_name: &str) -> AppResult<()> {
        self.with_active(id, |stored| {
            stored.user.first_name = first_name.to_string();
            stored.user.last_name = last_name.to_string();
            stored.user.updated_at = Utc::now();
        })
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        self.with_active(id, |stored| stored.deleted = true)
    }
}
