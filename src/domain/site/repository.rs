//! Site repository interface

use async_trait::async_trait;

use super::model::{Site, SiteDraft};
use crate::domain::{Actor, DomainResult};

#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Site>>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Site>>;

    /// The site owned by `user_id`, if any
    async fn find_by_user(&self, user_id: i64) -> DomainResult<Option<Site>>;

    async fn insert(&self, draft: SiteDraft, actor: Actor) -> DomainResult<Site>;
    async fn save(&self, site: &Site, actor: Actor) -> DomainResult<Site>;

    /// Delete a site; the owning user is left alone.
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
