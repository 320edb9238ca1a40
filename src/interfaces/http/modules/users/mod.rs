//! Users module: user CRUD, role detach and user queries

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
