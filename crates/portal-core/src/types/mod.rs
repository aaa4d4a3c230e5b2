//! Core type definitions used across the Med Portal workspace.

pub mod response;

pub use response::ErrorResponse;
