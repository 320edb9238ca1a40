//! SeaORM implementation of RoleRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::role::{Role, RoleRepository};
use crate::domain::{AuditStamp, DomainResult};
use crate::infrastructure::database::entities::role;

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn model_to_domain(m: role::Model) -> Role {
    Role {
        id: m.id,
        role_name: m.role_name,
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
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Role>> {
        let model = role::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }
}
