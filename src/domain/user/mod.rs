//! User aggregate
//!
//! Contains the User entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

// Re-export model types
pub use model::{User, UserDraft, UserSummary};

// Re-export DTOs
pub use dto_create::CreateUserDto;
pub use dto_update::UpdateUserDto;

// Re-export repository trait
pub use repository::UserRepository;
