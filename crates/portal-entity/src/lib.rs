//! # portal-entity
//!
//! Domain entity models for Med Portal. Every struct in this crate
//! represents a database table row, an input DTO, or a domain value
//! object. Database entities additionally derive `sqlx::FromRow`.
//!
//! The store contracts ([`user::UserStore`], [`session::SessionStore`])
//! live here so that the auth core and the database crate depend on the
//! same definitions without depending on each other.

pub mod session;
pub mod user;
pub mod validation;
