//! Refresh-session domain entities.

pub mod model;
pub mod store;
pub mod token;

pub use model::RefreshTokenRecord;
pub use store::SessionStore;
pub use token::TokenPair;
