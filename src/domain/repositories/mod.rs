//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives services unified access to all
//! per-aggregate repositories.

use super::role::RoleRepository;
use super::site::SiteRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_id(1).await?;
///     let site = repos.sites().find_by_user(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn roles(&self) -> &dyn RoleRepository;
    fn sites(&self) -> &dyn SiteRepository;
}
