//! JWT token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use portal_core::config::AuthConfig;
use portal_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Message carried by every token rejection.
const INVALID_TOKEN: &str = "invalid token";

/// Validates HS512 access and refresh tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC key for access tokens.
    access_key: DecodingKey,
    /// HMAC key for refresh tokens.
    refresh_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn verify_access(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Refresh)
    }

    /// Every failure maps to the same error; the reason is only logged.
    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        if token.is_empty() {
            debug!(expected = ?expected, "Rejected empty token");
            return Err(AppError::unauthorized(INVALID_TOKEN));
        }

        let key = match expected {
            TokenType::Access => &self.access_key,
            TokenType::Refresh => &self.refresh_key,
        };

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| {
                debug!(expected = ?expected, reason = %e, "Token verification failed");
                AppError::unauthorized(INVALID_TOKEN)
            })?
            .claims;

        if claims.token_type != expected {
            debug!(expected = ?expected, actual = ?claims.token_type, "Token type mismatch");
            return Err(AppError::unauthorized(INVALID_TOKEN));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::Utc;
    use portal_core::ErrorKind;
    use portal_core::config::HashingConfig;
    use portal_entity::user::Role;
    use uuid::Uuid;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(access: &str, refresh: &str) -> AuthConfig {
        AuthConfig {
            pepper: "pepper".into(),
            access_token_secret: access.into(),
            refresh_token_secret: refresh.into(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            leeway_seconds: 5,
            hashing: HashingConfig::default(),
        }
    }

    fn codec() -> (JwtEncoder, JwtDecoder) {
        let cfg = config("access-secret", "refresh-secret");
        (JwtEncoder::new(&cfg).unwrap(), JwtDecoder::new(&cfg))
    }

    fn assert_invalid(result: Result<Claims, AppError>) {
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.to_string(), "UNAUTHORIZED: invalid token");
    }

    #[test]
    fn test_access_round_trip() {
        let (enc, dec) = codec();
        let id = Uuid::now_v7();
        let (token, exp) = enc.issue_access(id, Role::Admin).unwrap();

        let claims = dec.verify_access(&token).unwrap();
        assert_eq!(claims.user_id, id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, exp.timestamp());
        assert!(claims.jti.is_none());
        assert!(claims.exp - claims.iat == 15 * 60);
    }

    #[test]
    fn test_refresh_round_trip_has_unique_jti() {
        let (enc, dec) = codec();
        let id = Uuid::now_v7();
        let (a, _) = enc.issue_refresh(id, Role::User).unwrap();
        let (b, _) = enc.issue_refresh(id, Role::User).unwrap();
        assert_ne!(a, b);

        let claims = dec.verify_refresh(&a).unwrap();
        assert_eq!(claims.user_id, id);
        assert!(claims.jti.is_some());
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let (enc, dec) = codec();
        let pair = enc.issue_pair(Uuid::now_v7(), Role::User).unwrap();
        assert_invalid(dec.verify_refresh(&pair.access_token));
        assert_invalid(dec.verify_access(&pair.refresh_token));
    }

    #[test]
    fn test_same_key_still_checks_type() {
        let cfg = config("shared", "shared");
        let (enc, dec) = (JwtEncoder::new(&cfg).unwrap(), JwtDecoder::new(&cfg));
        let (refresh, _) = enc.issue_refresh(Uuid::now_v7(), Role::User).unwrap();
        assert_invalid(dec.verify_access(&refresh));
    }

    #[test]
    fn test_foreign_key_rejected() {
        let (enc, _) = codec();
        let other = JwtDecoder::new(&config("other-access", "other-refresh"));
        let (token, _) = enc.issue_access(Uuid::now_v7(), Role::User).unwrap();
        assert_invalid(other.verify_access(&token));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let (enc, dec) = codec();
        let (token, _) = enc.issue_access(Uuid::now_v7(), Role::User).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(&parts[1]).unwrap()).unwrap();
        payload["role"] = serde_json::json!("super_admin");
        parts[1] = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());

        assert_invalid(dec.verify_access(&parts.join(".")));

        let mut flipped = token.into_bytes();
        let idx = flipped.len() - 10;
        flipped[idx] = if flipped[idx] == b'A' { b'B' } else { b'A' };
        assert_invalid(dec.verify_access(&String::from_utf8(flipped).unwrap()));
    }

    #[test]
    fn test_expired_token_rejected() {
        let (enc, dec) = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: Uuid::now_v7(),
            role: Role::User,
            iat: now - 3600,
            exp: now - 60,
            jti: None,
            token_type: TokenType::Access,
        };
        let token = enc.sign(&claims).unwrap();
        assert_invalid(dec.verify_access(&token));
    }

    #[test]
    fn test_expiry_within_leeway_accepted() {
        let (enc, dec) = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: Uuid::now_v7(),
            role: Role::User,
            iat: now - 900,
            exp: now - 1,
            jti: None,
            token_type: TokenType::Access,
        };
        let token = enc.sign(&claims).unwrap();
        assert!(dec.verify_access(&token).is_ok());
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let (_, dec) = codec();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&serde_json::json!({
                "user_id": Uuid::now_v7(),
                "role": "super_admin",
                "iat": Utc::now().timestamp(),
                "exp": Utc::now().timestamp() + 600,
                "token_type": "access",
            }))
            .unwrap(),
        );
        assert_invalid(dec.verify_access(&format!("{header}.{payload}.")));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let (_, dec) = codec();
        let claims = Claims {
            user_id: Uuid::now_v7(),
            role: Role::User,
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 600,
            jti: None,
            token_type: TokenType::Access,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS256),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();
        assert_invalid(dec.verify_access(&token));
    }

    #[test]
    fn test_missing_role_defaults_to_user() {
        let (_, dec) = codec();
        let user_id = Uuid::now_v7();
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS512),
            &serde_json::json!({
                "user_id": user_id,
                "iat": Utc::now().timestamp(),
                "exp": Utc::now().timestamp() + 600,
                "token_type": "access",
            }),
            &jsonwebtoken::EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        let claims = dec.verify_access(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn test_empty_and_garbage_rejected() {
        let (_, dec) = codec();
        assert_invalid(dec.verify_access(""));
        assert_invalid(dec.verify_refresh("not.a.jwt"));
    }
}
