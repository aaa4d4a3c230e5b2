//! Peppered Argon2id password hashing and verification.
//!
//! A password is first keyed with the server pepper through HMAC-SHA384,
//! the digest is base64 encoded, and that string is what Argon2id hashes.
//! The stored PHC string therefore embeds its own salt and cost
//! parameters while the pepper never touches the database.

use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString,
        rand_core::{OsRng, RngCore},
    },
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384};

use portal_core::config::AuthConfig;
use portal_core::error::AppError;

type HmacSha384 = Hmac<Sha384>;

/// Input hashed once to produce the decoy hash used for unknown accounts.
const DECOY_INPUT: &str = "decoy-credential-for-unknown-accounts";

/// Handles password hashing and verification using peppered Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    /// Server-wide HMAC key.
    pepper: Arc<[u8]>,
    /// Configured Argon2id instance.
    argon2: Argon2<'static>,
    /// Hash verified against when an account is missing. Built up front so
    /// the first unknown-account login costs the same as later ones.
    decoy: Arc<str>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", self.argon2.params())
            .finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Creates a hasher from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.pepper.is_empty() {
            return Err(AppError::internal("Pepper must not be empty"));
        }

        let params = Params::new(
            config.hashing.memory_kib,
            config.hashing.iterations,
            config.hashing.parallelism,
            None,
        )
        .map_err(|e| AppError::internal(format!("Invalid Argon2 parameters: {e}")))?;

        let mut hasher = Self {
            pepper: Arc::from(config.pepper.as_bytes()),
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            decoy: Arc::from(""),
        };
        hasher.decoy = Arc::from(hasher.hash_password(DECOY_INPUT)?);
        Ok(hasher)
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        if password.is_empty() {
            return Err(AppError::invalid_input("password is required"));
        }

        let peppered = self.pepper(password)?;
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` for a mismatch, for an empty password or hash,
    /// and for any stored hash the Argon2id verifier cannot check (bad PHC
    /// string, another algorithm, out-of-range parameters).
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        if password.is_empty() || hash.is_empty() {
            return Ok(false);
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
                return Ok(false);
            }
        };
        let peppered = self.pepper(password)?;

        match self.argon2.verify_password(peppered.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be verified");
                Ok(false)
            }
        }
    }

    /// Spends the same effort as a real verification and discards the result.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify_password(password, &self.decoy);
    }

    /// [`Self::hash_password`] on the blocking thread pool.
    pub async fn hash_password_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// [`Self::verify_password`] on the blocking thread pool.
    pub async fn verify_password_blocking(
        &self,
        password: String,
        hash: String,
    ) -> Result<bool, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }

    /// [`Self::verify_decoy`] on the blocking thread pool.
    pub async fn verify_decoy_blocking(&self, password: String) {
        let hasher = self.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || hasher.verify_decoy(&password)).await {
            tracing::warn!(error = %e, "Decoy verification task failed");
        }
    }

    fn pepper(&self, password: &str) -> Result<String, AppError> {
        let mut mac = <HmacSha384 as Mac>::new_from_slice(&self.pepper)
            .map_err(|e| AppError::internal(format!("Invalid pepper: {e}")))?;
        mac.update(password.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Hex-encoded SHA-256 of a token, used as its storage key.
pub fn fingerprint_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// 32 random bytes from the OS RNG, base64 encoded.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use portal_core::config::HashingConfig;

    use super::*;

    fn config(pepper: &str) -> AuthConfig {
        AuthConfig {
            pepper: pepper.to_string(),
            access_token_secret: "access".into(),
            refresh_token_secret: "refresh".into(),
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

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&config("test-pepper")).unwrap()
    }

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let h = hasher();
        let a = h.hash_password("Pass123!").unwrap();
        let b = h.hash_password("Pass123!").unwrap();

        assert_ne!(a, b);
        assert!(!a.contains("Pass123!"));
        assert!(a.starts_with("$argon2id$"));
        assert!(h.verify_password("Pass123!", &a).unwrap());
        assert!(h.verify_password("Pass123!", &b).unwrap());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let h = hasher();
        let hash = h.hash_password("Pass123!").unwrap();
        assert!(!h.verify_password("Pass124!", &hash).unwrap());
    }

    #[test]
    fn test_empty_inputs() {
        let h = hasher();
        assert!(h.hash_password("").is_err());
        let hash = h.hash_password("Pass123!").unwrap();
        assert!(!h.verify_password("", &hash).unwrap());
        assert!(!h.verify_password("Pass123!", "").unwrap());
    }

    #[test]
    fn test_pepper_is_part_of_the_hash() {
        let hash = hasher().hash_password("Pass123!").unwrap();
        let other = PasswordHasher::new(&config("another-pepper")).unwrap();
        assert!(!other.verify_password("Pass123!", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!hasher().verify_password("Pass123!", "not-a-phc-string").unwrap());
    }

    #[test]
    fn test_foreign_or_invalid_phc_does_not_verify() {
        let h = hasher();
        assert!(
            !h.verify_password(
                "Pass123!",
                "$scrypt$ln=15,r=8,p=1$c2FsdHNhbHQ$dGhpc2lzbm90YXJlYWxoYXNodmFsdWU"
            )
            .unwrap()
        );
        assert!(
            !h.verify_password(
                "Pass123!",
                "$argon2id$v=19$m=1,t=1,p=1$c2FsdHNhbHQ$dGhpc2lzbm90YXJlYWxoYXNodmFsdWU"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_decoy_is_ready_at_construction() {
        let h = hasher();
        assert!(h.decoy.starts_with("$argon2id$"));
        assert!(h.verify_password(DECOY_INPUT, &h.decoy).unwrap());

        let before = h.decoy.clone();
        h.verify_decoy("anything");
        assert_eq!(before, h.decoy);
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_generate_secret() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
        assert_eq!(STANDARD.decode(&a).unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_blocking_wrappers() {
        let h = hasher();
        let hash = h.hash_password_blocking("Pass123!".into()).await.unwrap();
        assert!(h.verify_password_blocking("Pass123!".into(), hash).await.unwrap());
    }
}
