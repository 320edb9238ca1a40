//! SeaORM implementation of UserRepository
//!
//! Every multi-row write runs inside a single transaction; the store-level
//! unique index on `users.email` backs the service-level e-mail check.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement, TransactionTrait,
};

use super::role_repository::model_to_domain as role_model_to_domain;
use crate::domain::role::Role;
use crate::domain::user::{User, UserDraft, UserRepository, UserSummary};
use crate::domain::{Actor, AuditStamp, DomainError, DomainResult};
use crate::infrastructure::database::entities::{role, site, user};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: user::Model, roles: Vec<Role>) -> User {
    User {
        id: m.id,
        name: m.name,
        surname: m.surname,
        email: m.email,
        age: m.age,
        salary: m.salary,
        password: m.password,
        roles,
        detached_roles: Vec::new(),
        audit: AuditStamp {
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        },
    }
}

/// Load the roles of all `models` with one query and assemble the
/// aggregates, keeping the order of `models`.
async fn with_roles<C: ConnectionTrait>(
    conn: &C,
    models: Vec<user::Model>,
) -> DomainResult<Vec<User>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let role_models = role::Entity::find()
        .filter(role::Column::UserId.is_in(ids))
        .order_by_asc(role::Column::Id)
        .all(conn)
        .await?;

    let mut by_user: HashMap<i64, Vec<Role>> = HashMap::new();
    for r in role_models {
        if let Some(user_id) = r.user_id {
            by_user
                .entry(user_id)
                .or_default()
                .push(role_model_to_domain(r));
        }
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let roles = by_user.remove(&m.id).unwrap_or_default();
            model_to_domain(m, roles)
        })
        .collect())
}

/// Case folding shared by the stored `name_folded` column and search prefixes.
fn fold(s: &str) -> String {
    s.to_lowercase()
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `name_folded LIKE '<folded prefix>%'`, or `None` for an empty prefix
/// (matches everything).
fn name_starts_with(prefix: &str) -> Option<SimpleExpr> {
    if prefix.is_empty() {
        return None;
    }
    let pattern = format!("{}%", escape_like(&fold(prefix)));
    Some(
        Expr::col((user::Entity, user::Column::NameFolded))
            .like(LikeExpr::new(pattern).escape('\\')),
    )
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        with_roles(&self.db, models).await
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let Some(model) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(with_roles(&self.db, vec![model]).await?.pop())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let Some(model) = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(with_roles(&self.db, vec![model]).await?.pop())
    }

    async fn exists(&self, id: i64) -> DomainResult<bool> {
        let count = user::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn insert(&self, draft: UserDraft, actor: Actor) -> DomainResult<User> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = user::ActiveModel {
            id: NotSet,
            name_folded: Set(draft.name.as_deref().map(fold)),
            name: Set(draft.name),
            surname: Set(draft.surname),
            email: Set(draft.email),
            age: Set(draft.age),
            salary: Set(draft.salary),
            password: Set(draft.password),
            created_at: Set(now),
            updated_at: Set(now),
            created_by: Set(Some(actor.id)),
            updated_by: Set(Some(actor.id)),
        }
        .insert(&txn)
        .await?;

        let mut roles = Vec::with_capacity(draft.roles.len());
        for new_role in draft.roles {
            let r = role::ActiveModel {
                id: NotSet,
                role_name: Set(new_role.role_name),
                user_id: Set(Some(model.id)),
                created_at: Set(now),
                updated_at: Set(now),
                created_by: Set(Some(actor.id)),
                updated_by: Set(Some(actor.id)),
            }
            .insert(&txn)
            .await?;
            roles.push(role_model_to_domain(r));
        }

        txn.commit().await?;
        debug!("Inserted user {} with {} role(s)", model.id, roles.len());

        Ok(model_to_domain(model, roles))
    }

    async fn save(&self, u: &User, actor: Actor) -> DomainResult<User> {
        let txn = self.db.begin().await?;

        let existing = user::Entity::find_by_id(u.id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("User", u.id))?;

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(u.name.clone());
        active.name_folded = Set(u.name.as_deref().map(fold));
        active.surname = Set(u.surname.clone());
        active.email = Set(u.email.clone());
        active.age = Set(u.age);
        active.salary = Set(u.salary);
        active.password = Set(u.password.clone());
        active.updated_at = Set(Utc::now());
        active.updated_by = Set(Some(actor.id));
        let updated = active.update(&txn).await?;

        // Orphan removal: a detached role lost its owner and must not outlive
        // this transaction. Roles attached by other writers are left alone.
        if !u.detached_roles.is_empty() {
            let removed = role::Entity::delete_many()
                .filter(role::Column::UserId.eq(u.id))
                .filter(role::Column::Id.is_in(u.detached_roles.iter().copied()))
                .exec(&txn)
                .await?
                .rows_affected;
            debug!("Removed {} orphaned role(s) of user {}", removed, u.id);
        }

        let roles = role::Entity::find()
            .filter(role::Column::UserId.eq(u.id))
            .order_by_asc(role::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;

        Ok(model_to_domain(
            updated,
            roles.into_iter().map(role_model_to_domain).collect(),
        ))
    }

    async fn delete_cascade(&self, id: i64) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        if user::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(DomainError::not_found("User", id));
        }

        let sites = site::Entity::delete_many()
            .filter(site::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        let roles = role::Entity::delete_many()
            .filter(role::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        user::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        debug!(
            "Deleted user {} with {} role(s) and {} site(s)",
            id, roles.rows_affected, sites.rows_affected
        );
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    async fn find_all_raw(&self) -> DomainResult<Vec<User>> {
        let backend = self.db.get_database_backend();
        let models = user::Entity::find()
            .from_raw_sql(Statement::from_string(
                backend,
                "SELECT * FROM users ORDER BY id",
            ))
            .all(&self.db)
            .await?;
        with_roles(&self.db, models).await
    }

    async fn find_names(&self) -> DomainResult<Vec<Option<String>>> {
        let names = user::Entity::find()
            .select_only()
            .column(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .into_tuple::<Option<String>>()
            .all(&self.db)
            .await?;
        Ok(names)
    }

    async fn search_by_prefix(&self, prefix: &str) -> DomainResult<Vec<User>> {
        let mut query = user::Entity::find();
        if let Some(expr) = name_starts_with(prefix) {
            query = query.filter(expr);
        }
        let models = query
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        with_roles(&self.db, models).await
    }

    async fn search_by_prefix_and_age(
        &self,
        prefix: &str,
        age: i32,
    ) -> DomainResult<Vec<UserSummary>> {
        let mut query = user::Entity::find().filter(user::Column::Age.eq(age));
        if let Some(expr) = name_starts_with(prefix) {
            query = query.filter(expr);
        }
        let rows = query
            .select_only()
            .columns([user::Column::Id, user::Column::Name, user::Column::Age])
            .order_by_asc(user::Column::Id)
            .into_tuple::<(i64, Option<String>, Option<i32>)>()
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, age)| UserSummary { id, name, age })
            .collect())
    }

    async fn find_ordered_by_salary_desc(&self) -> DomainResult<Vec<User>> {
        // SQLite sorts NULL lowest, so users without a salary come last.
        let models = user::Entity::find()
            .order_by_desc(user::Column::Salary)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        with_roles(&self.db, models).await
    }

    async fn find_by_names(&self, names: &[String]) -> DomainResult<Vec<User>> {
        let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        if unique.is_empty() {
            return Ok(Vec::new());
        }
        let models = user::Entity::find()
            .filter(user::Column::Name.is_in(unique))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        with_roles(&self.db, models).await
    }

    async fn count_by_age_greater_than(&self, age: i32) -> DomainResult<u64> {
        let count = user::Entity::find()
            .filter(user::Column::Age.gt(age))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn find_by_salary_range(&self, min: f64, max: f64) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .filter(user::Column::Salary.between(min, max))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        with_roles(&self.db, models).await
    }

    async fn find_with_null_name(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .filter(user::Column::Name.is_null())
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        with_roles(&self.db, models).await
    }

    async fn sum_salaries(&self) -> DomainResult<f64> {
        let total = user::Entity::find()
            .select_only()
            .column_as(Expr::col(user::Column::Salary).sum(), "total")
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await?;
        Ok(total.flatten().unwrap_or(0.0))
    }
}
