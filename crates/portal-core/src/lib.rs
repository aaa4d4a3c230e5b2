//! # portal-core
//!
//! Core crate for Med Portal. Contains the unified error system, the
//! client-facing error body, and the configuration schema shared by the
//! authentication core and its collaborators.
//!
//! This crate has **no** internal dependencies on other portal crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorDetail, ErrorKind, FieldError, FieldErrors};
pub use result::AppResult;
