//! # portal-auth
//!
//! Authentication and authorization core for Med Portal.
//!
//! ## Modules
//!
//! - `password`: peppered Argon2id password hashing and token fingerprints
//! - `jwt`: HS512 access and refresh token issuance and verification
//! - `session`: register, login, logout, and refresh-token rotation
//! - `rbac`: self-or-privileged authorization gate
//! - `context`: typed caller identity derived from verified tokens

pub mod context;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use context::{RefreshContext, RequestContext};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};
pub use password::PasswordHasher;
pub use rbac::{ListScope, Operation, RbacEnforcer};
pub use session::SessionManager;
