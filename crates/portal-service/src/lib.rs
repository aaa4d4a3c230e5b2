//! # portal-service
//!
//! Business logic service layer for Med Portal. Services take the caller's
//! [`RequestContext`] explicitly and consult the authorization gate before
//! touching a store.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod user;

pub use portal_auth::RequestContext;
pub use user::UserService;
