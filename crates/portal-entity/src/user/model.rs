//! User entity model and input DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::role::Role;
use crate::validation::{validate_name, validate_password_strength};

/// A registered user as seen by the rest of the system.
///
/// The password hash is deliberately absent; it only travels inside
/// [`UserCredential`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier (UUIDv7).
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Normalized (trimmed, lowercase) email address.
    pub email: String,
    /// Role used by the authorization gate.
    pub role: Role,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// Last profile change.
    pub updated_at: DateTime<Utc>,
}

/// What login needs to know about an account.
#[derive(Clone, FromRow)]
pub struct UserCredential {
    /// User identifier.
    pub id: Uuid,
    /// Stored slow hash of the peppered password.
    pub password_hash: String,
    /// Role embedded in issued tokens.
    pub role: Role,
}

impl std::fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredential")
            .field("id", &self.id)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// A fully prepared user row, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Pre-generated UUIDv7.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Normalized email.
    pub email: String,
    /// Slow hash of the peppered password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}

/// Registration candidate.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    /// Given name.
    #[validate(
        length(min = 1, message = "first_name is required"),
        custom(function = "validate_name", message = "invalid first_name")
    )]
    pub first_name: String,
    /// Family name.
    #[validate(
        length(min = 1, message = "last_name is required"),
        custom(function = "validate_name", message = "invalid last_name")
    )]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "invalid email"))]
    pub email: String,
    /// Plaintext password. Never logged.
    #[validate(
        length(min = 8, message = "password must be at least 8 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

impl CreateUser {
    /// Trim whitespace around names and email, and lowercase the email.
    pub fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
    }
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "invalid email"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// Trim and lowercase the email so lookups match registration.
    pub fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Name change request. Both names are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    /// New given name.
    #[validate(
        required(message = "first_name is required"),
        length(min = 1, message = "first_name is required"),
        custom(function = "validate_name", message = "invalid first_name")
    )]
    pub first_name: Option<String>,
    /// New family name.
    #[validate(
        required(message = "last_name is required"),
        length(min = 1, message = "last_name is required"),
        custom(function = "validate_name", message = "invalid last_name")
    )]
    pub last_name: Option<String>,
}

impl UpdateUser {
    /// Trim whitespace around both names.
    pub fn normalize(&mut self) {
        if let Some(name) = self.first_name.as_mut() {
            *name = name.trim().to_string();
        }
        if let Some(name) = self.last_name.as_mut() {
            *name = name.trim().to_string();
        }
    }
}
