//! Session lifecycle: registration, login, logout, and refresh rotation.

pub mod manager;

pub use manager::SessionManager;
