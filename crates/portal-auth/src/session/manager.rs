//! Session lifecycle manager: register, login, logout and refresh token rotation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use portal_core::config::AuthConfig;
use portal_core::error::{AppError, ErrorKind};
use portal_entity::session::{RefreshTokenRecord, SessionStore, TokenPair};
use portal_entity::user::{CreateUser, LoginRequest, NewUser, Role, UserStore};
use portal_entity::validation::check;

use crate::context::{RefreshContext, RequestContext, bearer_token};
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, fingerprint_token};

/// Manages the complete session lifecycle.
///
/// Holds no mutable state of its own; all durable state lives behind the
/// user and session stores.
#[derive(Clone)]
pub struct SessionManager {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Refresh token persistence.
    sessions: Arc<dyn SessionStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Token signer.
    encoder: Arc<JwtEncoder>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("hasher", &self.hasher)
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        hasher: PasswordHasher,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Validates `config` and builds the hasher and token codec from it.
    pub fn from_config(
        config: &AuthConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self::new(
            users,
            sessions,
            PasswordHasher::new(config)?,
            Arc::new(JwtEncoder::new(config)?),
            Arc::new(JwtDecoder::new(config)),
        ))
    }

    /// Registers a new user with the default role.
    ///
    /// The candidate is normalized and validated first; every failing
    /// field is reported in a single `InvalidInput` error.
    pub async fn register(&self, mut candidate: CreateUser) -> Result<Uuid, AppError> {
        candidate.normalize();
        check(&candidate)?;

        let CreateUser {
            first_name,
            last_name,
            email,
            password,
        } = candidate;

        let password_hash = self.hasher.hash_password_blocking(password).await?;
        let user = NewUser {
            id: Uuid::now_v7(),
            first_name,
            last_name,
            email,
            password_hash,
            role: Role::default(),
        };

        match self.users.insert_user(&user).await {
            Ok(()) => {
                info!(user_id = %user.id, "User registered");
                Ok(user.id)
            }
            Err(e) if e.is(ErrorKind::AlreadyExists) => {
                debug!("Registration rejected: email already exists");
                Err(AppError::already_exists("email already exists"))
            }
            Err(e) => Err(store_failure("insert user", e)),
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Validate and normalize the request
    /// 2. Look up the credential by email
    /// 3. Verify the password (a decoy hash is checked for unknown emails)
    /// 4. Issue a token pair and persist the refresh record
    ///
    /// An unknown email is a `NotFound` surfaced to clients as
    /// `Unauthorized`, so it is indistinguishable from a bad password.
    pub async fn login(&self, mut request: LoginRequest) -> Result<TokenPair, AppError> {
        request.normalize();
        check(&request)?;

        let credential = self
            .users
            .find_credential_by_email(&request.email)
            .await
            .map_err(|e| store_failure("find credential", e))?;

        let Some(credential) = credential else {
            self.hasher.verify_decoy_blocking(request.password).await;
            warn!("Login failed: unknown email");
            return Err(
                AppError::not_found("email not found").surfaced_as(ErrorKind::Unauthorized)
            );
        };

        let valid = self
            .hasher
            .verify_password_blocking(request.password, credential.password_hash)
            .await?;

        if !valid {
            warn!(user_id = %credential.id, "Login failed: wrong password");
            return Err(AppError::unauthorized("invalid credentials"));
        }

        let tokens = self.issue_and_store(credential.id, credential.role).await?;
        info!(user_id = %credential.id, role = %credential.role, "Login successful");
        Ok(tokens)
    }

    /// Revokes the refresh token. Unknown or already revoked tokens are a
    /// successful no-op.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        if refresh_token.is_empty() {
            return Err(AppError::unauthorized("missing refresh token"));
        }

        match self
            .sessions
            .revoke_if_active(&fingerprint_token(refresh_token))
            .await
        {
            Ok(()) => {
                info!("Logout completed");
                Ok(())
            }
            Err(e) if e.is(ErrorKind::NotFound) => {
                debug!("Logout of unknown or already revoked token");
                Ok(())
            }
            Err(e) => Err(store_failure("revoke refresh token", e)),
        }
    }

    /// Rotates the refresh token.
    ///
    /// 1. Revoke the presented token (a miss means reuse → `Unauthorized`)
    /// 2. Issue a new pair
    /// 3. Persist the new refresh record
    pub async fn refresh(&self, context: RefreshContext) -> Result<TokenPair, AppError> {
        let RefreshContext {
            user_id,
            role,
            presented_token,
        } = context;

        if let Some(token) = presented_token {
            match self
                .sessions
                .revoke_if_active(&fingerprint_token(&token))
                .await
            {
                Ok(()) => {}
                Err(e) if e.is(ErrorKind::NotFound) => {
                    warn!(user_id = %user_id, "Refresh token reuse suspected");
                    return Err(AppError::unauthorized("refresh token is no longer valid"));
                }
                Err(e) => return Err(store_failure("revoke refresh token", e)),
            }
        }

        let tokens = self.issue_and_store(user_id, role).await?;
        info!(user_id = %user_id, "Token refreshed");
        Ok(tokens)
    }

    /// Verifies an `Authorization` header value carrying a bearer access token.
    pub fn authenticate(&self, authorization_header: &str) -> Result<RequestContext, AppError> {
        let token = bearer_token(authorization_header)
            .ok_or_else(|| AppError::unauthorized("missing bearer token"))?;
        let claims = self.decoder.verify_access(token)?;
        Ok(RequestContext::from(&claims))
    }

    /// Verifies a raw refresh token and captures it for rotation.
    pub fn authenticate_refresh(&self, refresh_token: &str) -> Result<RefreshContext, AppError> {
        let claims = self.decoder.verify_refresh(refresh_token)?;
        Ok(RefreshContext::new(
            claims.user_id,
            claims.role,
            Some(refresh_token.to_string()),
        ))
    }

    /// The pair is only returned after its refresh record is stored.
    async fn issue_and_store(&self, user_id: Uuid, role: Role) -> Result<TokenPair, AppError> {
        let tokens = self.encoder.issue_pair(user_id, role)?;

        let record = RefreshTokenRecord::new(
            Uuid::now_v7(),
            user_id,
            fingerprint_token(&tokens.refresh_token),
            tokens.refresh_expires_at,
        );

        self.sessions
            .insert_refresh_record(&record)
            .await
            .map_err(|e| store_failure("insert refresh record", e))?;

        Ok(tokens)
    }
}

/// Store errors the lifecycle does not handle are reported as `Internal`.
fn store_failure(operation: &str, err: AppError) -> AppError {
    error!(operation = operation, error = %err, "Store operation failed");
    if err.is(ErrorKind::Internal) {
        err
    } else {
        AppError::internal(format!("{operation} failed: {err}"))
    }
}
