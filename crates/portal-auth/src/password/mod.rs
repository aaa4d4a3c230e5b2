//! Password hashing and token fingerprinting.

pub mod hasher;

pub use hasher::{PasswordHasher, fingerprint_token, generate_secret};
