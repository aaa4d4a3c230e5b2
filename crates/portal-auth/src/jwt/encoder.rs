//! JWT token creation with independent access and refresh keys.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use portal_core::config::AuthConfig;
use portal_core::error::AppError;
use portal_entity::session::TokenPair;
use portal_entity::user::Role;

use super::claims::{Claims, TokenType};

/// Creates signed HS512 access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC key for access tokens.
    access_key: EncodingKey,
    /// HMAC key for refresh tokens.
    refresh_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let access_ttl = Duration::try_minutes(config.access_ttl_minutes)
            .ok_or_else(|| AppError::internal("auth.access_ttl_minutes is out of range"))?;
        let refresh_ttl = Duration::try_days(config.refresh_ttl_days)
            .ok_or_else(|| AppError::internal("auth.refresh_ttl_days is out of range"))?;

        Ok(Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        })
    }

    /// Issues an access token. Returns the token and its expiry.
    pub fn issue_access(
        &self,
        user_id: Uuid,
        role: Role,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = expiry(now, self.access_ttl)?;
        let claims = Claims {
            user_id,
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: None,
            token_type: TokenType::Access,
        };
        Ok((self.sign(&claims)?, exp))
    }

    /// Issues a refresh token with a fresh `jti`. Returns the token and its expiry.
    pub fn issue_refresh(
        &self,
        user_id: Uuid,
        role: Role,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = expiry(now, self.refresh_ttl)?;
        let claims = Claims {
            user_id,
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Some(Uuid::new_v4()),
            token_type: TokenType::Refresh,
        };
        Ok((self.sign(&claims)?, exp))
    }

    /// Issues an access + refresh token pair for the given user.
    pub fn issue_pair(&self, user_id: Uuid, role: Role) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.issue_access(user_id, role)?;
        let (refresh_token, refresh_expires_at) = self.issue_refresh(user_id, role)?;

        Ok(TokenPair {
            access_token,
            access_expires_at,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Signs arbitrary claims with the key matching their token type.
    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        let key = match claims.token_type {
            TokenType::Access => &self.access_key,
            TokenType::Refresh => &self.refresh_key,
        };
        encode(&Header::new(Algorithm::HS512), claims, key)
            .map_err(|e| AppError::internal_from("Failed to sign token", e))
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, AppError> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| AppError::internal("Token expiry is out of range"))
}
