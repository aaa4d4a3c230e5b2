//! Role-based authorization gate.

pub mod enforcer;

pub use enforcer::{ListScope, Operation, RbacEnforcer};
