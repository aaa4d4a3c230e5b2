//! User domain entities.

pub mod model;
pub mod role;
pub mod store;

pub use model::{CreateUser, LoginRequest, NewUser, UpdateUser, User, UserCredential};
pub use role::Role;
pub use store::UserStore;
