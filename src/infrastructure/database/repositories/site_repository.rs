//! SeaORM implementation of SiteRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::site::{Site, SiteDraft, SiteRepository};
use crate::domain::{Actor, AuditStamp, DomainError, DomainResult};
use crate::infrastructure::database::entities::site;

pub struct SeaOrmSiteRepository {
    db: DatabaseConnection,
}

impl SeaOrmSiteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: site::Model) -> Site {
    Site {
        id: m.id,
        name: m.name,
        port: m.port,
        user_id: m.user_id,
        audit: AuditStamp {
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        },
    }
}

#[async_trait]
impl SiteRepository for SeaOrmSiteRepository {
    async fn find_all(&self) -> DomainResult<Vec<Site>> {
        let models = site::Entity::find()
            .order_by_asc(site::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Site>> {
        let model = site::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_user(&self, user_id: i64) -> DomainResult<Option<Site>> {
        let model = site::Entity::find()
            .filter(site::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn insert(&self, draft: SiteDraft, actor: Actor) -> DomainResult<Site> {
        let now = Utc::now();
        let model = site::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            port: Set(draft.port),
            user_id: Set(draft.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            created_by: Set(Some(actor.id)),
            updated_by: Set(Some(actor.id)),
        }
        .insert(&self.db)
        .await?;

        debug!("Inserted site {} for user {}", model.id, model.user_id);
        Ok(model_to_domain(model))
    }

    async fn save(&self, s: &Site, actor: Actor) -> DomainResult<Site> {
        let existing = site::Entity::find_by_id(s.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Site", s.id))?;

        // The owner is fixed at creation.
        let mut active: site::ActiveModel = existing.into();
        active.name = Set(s.name.clone());
        active.port = Set(s.port.clone());
        active.updated_at = Set(Utc::now());
        active.updated_by = Set(Some(actor.id));

        let updated = active.update(&self.db).await?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = site::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Site", id));
        }
        debug!("Deleted site {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{UserDraft, UserRepository};
    use crate::infrastructure::database::repositories::user_repository::SeaOrmUserRepository;
    use crate::infrastructure::database::test_support::setup_db;

    const ACTOR: Actor = Actor { id: 1 };

    async fn seed_user(db: &DatabaseConnection, email: &str) -> i64 {
        let users = SeaOrmUserRepository::new(db.clone());
        users
            .insert(
                UserDraft {
                    name: Some("Owner".into()),
                    surname: None,
                    email: email.into(),
                    age: None,
                    salary: None,
                    password: None,
                    roles: Vec::new(),
                },
                ACTOR,
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn second_site_for_same_user_is_conflict() {
        let db = setup_db().await;
        let user_id = seed_user(&db, "owner@example.com").await;
        let repo = SeaOrmSiteRepository::new(db);

        let draft = SiteDraft {
            name: Some("Google".into()),
            port: Some("8080".into()),
            user_id,
        };
        repo.insert(draft.clone(), ACTOR).await.unwrap();
        let err = repo.insert(draft, ACTOR).await.unwrap_err();
        assert!(err.is_conflict(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn save_keeps_owner() {
        let db = setup_db().await;
        let user_id = seed_user(&db, "owner@example.com").await;
        let repo = SeaOrmSiteRepository::new(db);

        let mut site = repo
            .insert(
                SiteDraft {
                    name: Some("Google".into()),
                    port: Some("8080".into()),
                    user_id,
                },
                ACTOR,
            )
            .await
            .unwrap();
        site.name = Some("Updated Google".into());
        site.user_id = 999;

        let saved = repo.save(&site, ACTOR).await.unwrap();
        assert_eq!(saved.name.as_deref(), Some("Updated Google"));
        assert_eq!(saved.user_id, user_id);
        assert_eq!(repo.find_by_user(user_id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn delete_missing_site_is_not_found() {
        let repo = SeaOrmSiteRepository::new(setup_db().await);
        assert!(repo.delete(5).await.unwrap_err().is_not_found());
    }
}
