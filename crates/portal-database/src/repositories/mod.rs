//! PostgreSQL store implementations.

pub mod refresh_token;
pub mod user;

pub use refresh_token::PgSessionStore;
pub use user::PgUserStore;
