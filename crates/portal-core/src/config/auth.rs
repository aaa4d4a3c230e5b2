//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TTL_MINUTES: i64 = 24 * 60;
/// Longest accepted refresh token lifetime.
pub const MAX_REFRESH_TTL_DAYS: i64 = 365;
/// Longest accepted clock-skew allowance.
pub const MAX_LEEWAY_SECONDS: u64 = 300;

/// Credential hashing and token signing configuration.
///
/// The pepper and both signing secrets have no defaults; they must come
/// from a config file or the `PORTAL__AUTH__*` environment variables.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Server-wide secret mixed into every password before hashing.
    pub pepper: String,
    /// HMAC key for access tokens.
    pub access_token_secret: String,
    /// HMAC key for refresh tokens. Must differ from the access key.
    pub refresh_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: i64,
    /// Allowed clock skew when checking token expiry, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Slow-hash cost parameters.
    #[serde(default)]
    pub hashing: HashingConfig,
}

// Secrets stay out of Debug output so a logged config cannot leak them.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("pepper", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("hashing", &self.hashing)
            .finish()
    }
}

impl AuthConfig {
    /// Check the secrets and lifetimes before any component is built.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.pepper.trim().is_empty() {
            return Err(AppError::internal("auth.pepper must not be empty"));
        }
        if self.access_token_secret.trim().is_empty() {
            return Err(AppError::internal("auth.access_token_secret must not be empty"));
        }
        if self.refresh_token_secret.trim().is_empty() {
            return Err(AppError::internal("auth.refresh_token_secret must not be empty"));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(AppError::internal(
                "auth.access_token_secret and auth.refresh_token_secret must differ",
            ));
        }
        if !(1..=MAX_ACCESS_TTL_MINUTES).contains(&self.access_ttl_minutes) {
            return Err(AppError::internal(format!(
                "auth.access_ttl_minutes must be between 1 and {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if !(1..=MAX_REFRESH_TTL_DAYS).contains(&self.refresh_ttl_days) {
            return Err(AppError::internal(format!(
                "auth.refresh_ttl_days must be between 1 and {MAX_REFRESH_TTL_DAYS}"
            )));
        }
        if self.leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(AppError::internal(format!(
                "auth.leeway_seconds must be at most {MAX_LEEWAY_SECONDS}"
            )));
        }
        Ok(())
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_access_ttl() -> i64 {
    15
}

fn default_refresh_ttl() -> i64 {
    7
}

fn default_leeway() -> u64 {
    5
}

fn default_memory_kib() -> u32 {
    19456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
