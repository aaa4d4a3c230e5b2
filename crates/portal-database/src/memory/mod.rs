//! In-memory store implementations backed by `DashMap`.
//!
//! They honour the same contracts as the PostgreSQL stores, including
//! email uniqueness and the compare-and-set revocation, and are used by
//! tests and the CLI.

pub mod session;
pub mod user;

pub use session::MemorySessionStore;
pub use user::MemoryUserStore;
