//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod repository_provider;
pub mod role_repository;
pub mod site_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
