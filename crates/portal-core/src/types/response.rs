//! Response types handed to the transport layer.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Client-facing error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP-style numeric status.
    pub code: u16,
    /// Machine-readable upper-snake status.
    pub status: String,
    /// Human-readable message safe to show to clients.
    pub message: String,
    /// Per-field validation failures, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    /// Body without field errors.
    pub fn new(code: u16, status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            status: status.into(),
            message: message.into(),
            fields: None,
        }
    }
}
