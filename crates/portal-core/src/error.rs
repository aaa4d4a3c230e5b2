//! Unified application error types for Med Portal.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. An error carries either a single
//! message or a non-empty list of per-field validation failures, never both.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::response::ErrorResponse;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed credentials or payload.
    InvalidInput,
    /// A uniqueness conflict (duplicate email, duplicate record).
    AlreadyExists,
    /// The requested resource was not found.
    NotFound,
    /// The resource existed but has already been deleted.
    Gone,
    /// Bad password, invalid/expired/tampered token, replayed refresh token.
    Unauthorized,
    /// The authorization gate denied the operation.
    Forbidden,
    /// An unexpected storage or crypto failure.
    Internal,
}

impl ErrorKind {
    /// Machine-readable status string shown to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::Gone => "ALREADY_DELETED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// HTTP-style status code a transport layer should use for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::AlreadyExists => 409,
            Self::NotFound => 404,
            Self::Gone => 410,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::Internal => 500,
        }
    }

    /// Fixed message used whenever the real message must not reach a client.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::AlreadyExists => "Already exists",
            Self::NotFound => "Not found",
            Self::Gone => "Already deleted",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::Internal => "Internal server error",
        }
    }

    /// Kinds whose message is always replaced by [`Self::public_message`].
    fn is_opaque(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden | Self::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure tied to an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field, as the client sent it.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A non-empty list of field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Wraps the collected errors, returning `None` when there are none.
    pub fn new(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// A list holding exactly one field error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    /// Borrow the errors.
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Number of field errors (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if some error refers to `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Consume into the inner vector.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

/// What an error says: a message or a set of field failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// A single category-level message.
    Message(String),
    /// Per-field validation failures.
    Fields(FieldErrors),
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Fields(fields) => {
                f.write_str("validation failed")?;
                for (i, e) in fields.as_slice().iter().enumerate() {
                    let sep = if i == 0 { ": " } else { ", " };
                    write!(f, "{sep}{} {}", e.field, e.message)?;
                }
                Ok(())
            }
        }
    }
}

/// The unified application error used throughout Med Portal.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls or
/// explicit `.map_err()` calls. Clients never see an `AppError` directly;
/// they see the [`ErrorResponse`] built by [`AppError::to_response`].
#[derive(Debug, Error)]
#[error("{kind}: {detail}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// Message or field errors.
    pub detail: ErrorDetail,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Kind reported to clients when it must differ from `kind`.
    surface: Option<ErrorKind>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            detail: ErrorDetail::Message(message.into()),
            source: None,
            surface: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            detail: ErrorDetail::Message(message.into()),
            source: Some(Box::new(source)),
            surface: None,
        }
    }

    /// Create an input error listing every failing field.
    pub fn invalid_fields(fields: FieldErrors) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            detail: ErrorDetail::Fields(fields),
            source: None,
            surface: None,
        }
    }

    /// Create an invalid-input error with a single message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Create an already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an already-deleted error.
    pub fn gone(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Gone, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Wrap any lower-level error as `Internal`, keeping it as the source.
    pub fn internal_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorKind::Internal, message, source)
    }

    /// Report this error to clients as `kind` while keeping the real kind
    /// for internal decisions and logs.
    pub fn surfaced_as(mut self, kind: ErrorKind) -> Self {
        self.surface = Some(kind);
        self
    }

    /// The kind a client will observe.
    pub fn public_kind(&self) -> ErrorKind {
        self.surface.unwrap_or(self.kind)
    }

    /// Returns `true` if the error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Field errors, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match &self.detail {
            ErrorDetail::Fields(fields) => Some(fields),
            ErrorDetail::Message(_) => None,
        }
    }

    /// Builds the body a transport layer should send to the client.
    ///
    /// Internal text, sources and surfaced-away kinds are never included.
    pub fn to_response(&self) -> ErrorResponse {
        let kind = self.public_kind();

        if kind == ErrorKind::Internal {
            tracing::error!(error = %self, "Internal error");
        }

        if kind.is_opaque() || self.surface.is_some() {
            return ErrorResponse::new(kind.status_code(), kind.as_str(), kind.public_message());
        }

        match &self.detail {
            ErrorDetail::Fields(fields) => ErrorResponse {
                code: 422,
                status: "VALIDATION_ERROR".to_string(),
                message: "Validation failed".to_string(),
                fields: Some(fields.as_slice().to_vec()),
            },
            ErrorDetail::Message(message) => {
                ErrorResponse::new(kind.status_code(), kind.as_str(), message.clone())
            }
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            detail: self.detail.clone(),
            source: None,
            surface: self.surface,
        }
    }
}
