//! Role repository interface

use async_trait::async_trait;

use super::model::Role;
use crate::domain::DomainResult;

/// Read access to roles. Role mutations go through the owning user
/// (`UserRepository::insert` / `UserRepository::save`).
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Role>>;
}
