//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use uuid::Uuid;

use portal_auth::{RequestContext, SessionManager};
use portal_core::config::{AuthConfig, HashingConfig};
use portal_database::{MemorySessionStore, MemoryUserStore};
use portal_entity::session::TokenPair;
use portal_entity::user::{CreateUser, LoginRequest, Role};
use portal_service::UserService;

/// Password used for every seeded account.
pub const PASSWORD: &str = "Pass123!";

/// Test application context wired over in-memory stores.
pub struct TestApp {
    /// Session lifecycle controller.
    pub sessions: SessionManager,
    /// User resource service.
    pub users: UserService,
    /// Backing user store, for provisioning roles.
    pub user_store: Arc<MemoryUserStore>,
    /// Backing session store, for inspecting records.
    pub session_store: Arc<MemorySessionStore>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let user_store = Arc::new(MemoryUserStore::new());
        let session_store = Arc::new(MemorySessionStore::new());

        let sessions =
            SessionManager::from_config(&test_config(), user_store.clone(), session_store.clone())
                .expect("Failed to build session manager");
        let users = UserService::new(user_store.clone());

        Self {
            sessions,
            users,
            user_store,
            session_store,
        }
    }

    /// Register a user with [`PASSWORD`] and return its id.
    pub async fn register(&self, email: &str) -> Uuid {
        self.sessions
            .register(CreateUser {
                first_name: "Test".into(),
                last_name: "User".into(),
                email: email.into(),
                password: PASSWORD.into(),
            })
            .await
            .expect("Failed to register test user")
    }

    /// Register a user and grant it `role`.
    pub async fn register_with_role(&self, email: &str, role: Role) -> Uuid {
        let id = self.register(email).await;
        self.user_store
            .set_role(id, role)
            .expect("Failed to set role");
        id
    }

    /// Log in with [`PASSWORD`].
    pub async fn login(&self, email: &str) -> TokenPair {
        self.sessions
            .login(LoginRequest {
                email: email.into(),
                password: PASSWORD.into(),
            })
            .await
            .expect("Failed to log in")
    }

    /// Authenticate the access token of `pair` as a bearer header would.
    pub fn context(&self, pair: &TokenPair) -> RequestContext {
        self.sessions
            .authenticate(&format!("Bearer {}", pair.access_token))
            .expect("Failed to authenticate access token")
    }
}

/// Auth configuration with a cheap hash so tests stay fast.
pub fn test_config() -> AuthConfig {
    AuthConfig {
        pepper: "integration-pepper".into(),
        access_token_secret: "integration-access-secret".into(),
        refresh_token_secret: "integration-refresh-secret".into(),
        access_ttl_minutes: 15,
        refresh_ttl_days: 7,
        leeway_seconds: 5,
        hashing: HashingConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        },
    }
}
