//! # Tekrar service
//!
//! Record-management backend for users, the roles they own and the single
//! site each user may have.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: `UserService` / `SiteService` use-cases
//! - **infrastructure**: SeaORM entities, schema and repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error type and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_api_router;
pub use server::{init_tracing, ServerHandle, ServerOptions};
