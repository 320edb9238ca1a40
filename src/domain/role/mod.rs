//! Role: subordinate collection owned by a user
//!
//! A role always belongs to exactly one user while it is persisted; a role
//! whose owner is cleared is deleted in the same transaction.

pub mod model;
pub mod repository;

pub use model::{NewRole, Role, DEFAULT_ROLE_NAME};
pub use repository::RoleRepository;
