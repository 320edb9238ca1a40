//! Site service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Actor, CreateSiteDto, DomainError, DomainResult, RepositoryProvider, Site, SiteDraft,
    UpdateSiteDto,
};

pub struct SiteService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SiteService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Site>> {
        self.repos.sites().find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Site> {
        self.repos
            .sites()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Site", id))
    }

    /// Create a site for an existing user that owns no site yet.
    pub async fn create(&self, actor: Actor, dto: CreateSiteDto) -> DomainResult<Site> {
        let user_id = dto
            .user_id
            .ok_or_else(|| DomainError::Validation("user_id is required".into()))?;

        if !self.repos.users().exists(user_id).await? {
            return Err(DomainError::not_found("User", user_id));
        }
        if let Some(existing) = self.repos.sites().find_by_user(user_id).await? {
            return Err(DomainError::Conflict(format!(
                "user {} already owns site {}",
                user_id, existing.id
            )));
        }

        let site = self
            .repos
            .sites()
            .insert(
                SiteDraft {
                    name: dto.name,
                    port: dto.port,
                    user_id,
                },
                actor,
            )
            .await?;

        info!(site_id = site.id, user_id, actor = actor.id, "Site created");
        Ok(site)
    }

    pub async fn update(&self, actor: Actor, id: i64, dto: UpdateSiteDto) -> DomainResult<Site> {
        let mut site = self.get_by_id(id).await?;
        dto.apply_to(&mut site);
        let site = self.repos.sites().save(&site, actor).await?;
        info!(site_id = id, actor = actor.id, "Site updated");
        Ok(site)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.sites().delete(id).await?;
        info!(site_id = id, "Site deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::users::UserService;
    use crate::domain::CreateUserDto;
    use crate::infrastructure::database::test_support::setup_db;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    const ACTOR: Actor = Actor { id: 1 };

    async fn setup() -> (SiteService, i64) {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(setup_db().await));
        let owner = UserService::new(repos.clone())
            .create(
                ACTOR,
                CreateUserDto {
                    name: Some("Ahmet".into()),
                    email: "ahmet@example.com".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        (SiteService::new(repos), owner.id)
    }

    fn google(user_id: Option<i64>) -> CreateSiteDto {
        CreateSiteDto {
            name: Some("Google".into()),
            port: Some("8080".into()),
            user_id,
        }
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let (sites, owner) = setup().await;
        let site = sites.create(ACTOR, google(Some(owner))).await.unwrap();

        assert_eq!(site.user_id, owner);
        assert_eq!(sites.get_by_id(site.id).await.unwrap(), site);
        assert_eq!(sites.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn second_site_for_owner_is_conflict() {
        let (sites, owner) = setup().await;
        sites.create(ACTOR, google(Some(owner))).await.unwrap();
        let err = sites.create(ACTOR, google(Some(owner))).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn create_requires_existing_user() {
        let (sites, _) = setup().await;
        assert!(matches!(
            sites.create(ACTOR, google(None)).await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(sites
            .create(ACTOR, google(Some(404)))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn update_merges_name_and_port() {
        let (sites, owner) = setup().await;
        let site = sites.create(ACTOR, google(Some(owner))).await.unwrap();

        let updated = sites
            .update(
                ACTOR,
                site.id,
                UpdateSiteDto {
                    name: Some("Updated Google".into()),
                    port: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("Updated Google"));
        assert_eq!(updated.port.as_deref(), Some("8080"));
        assert_eq!(updated.user_id, owner);
    }

    #[tokio::test]
    async fn delete_leaves_owner_in_place() {
        let (sites, owner) = setup().await;
        let site = sites.create(ACTOR, google(Some(owner))).await.unwrap();

        sites.delete(site.id).await.unwrap();

        assert!(sites.get_by_id(site.id).await.unwrap_err().is_not_found());
        assert!(sites.delete(site.id).await.unwrap_err().is_not_found());
        // the owner may now receive a new site
        sites.create(ACTOR, google(Some(owner))).await.unwrap();
    }
}
