//! User management: aggregate consistency and user queries

pub mod service;

pub use service::UserService;
