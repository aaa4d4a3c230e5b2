//! # portal-database
//!
//! Store implementations for Med Portal: PostgreSQL repositories backed
//! by sqlx, and dashmap-backed in-memory stores with the same semantics
//! for tests and local tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::{MemorySessionStore, MemoryUserStore};
pub use repositories::{PgSessionStore, PgUserStore};
