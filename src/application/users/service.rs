//! User aggregate service
//!
//! Owns the User↔Role and User↔Site consistency rules and the read-only
//! user queries. HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    Actor, CreateUserDto, DomainError, DomainResult, NewRole, RepositoryProvider, UpdateUserDto,
    User, UserDraft, UserSummary,
};

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Aggregate operations ────────────────────────────────────

    pub async fn list_all(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Create a user with exactly one default role attached.
    pub async fn create(&self, actor: Actor, dto: CreateUserDto) -> DomainResult<User> {
        if dto.email.trim().is_empty() {
            return Err(DomainError::Validation("email is required".into()));
        }
        if self.repos.users().find_by_email(&dto.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                dto.email
            )));
        }

        let mut draft = UserDraft::from(dto);
        draft.attach_role(NewRole::default());

        let user = self.repos.users().insert(draft, actor).await?;
        info!(user_id = user.id, actor = actor.id, "User created");
        Ok(user)
    }

    /// Merge the present fields of `dto` onto the stored user.
    pub async fn update(&self, actor: Actor, id: i64, dto: UpdateUserDto) -> DomainResult<User> {
        let mut user = self.get_by_id(id).await?;

        if let Some(email) = dto.email.as_deref() {
            if email.trim().is_empty() {
                return Err(DomainError::Validation("email must not be blank".into()));
            }
            if email != user.email {
                if let Some(other) = self.repos.users().find_by_email(email).await? {
                    if other.id != id {
                        return Err(DomainError::Conflict(format!(
                            "email {} is already registered",
                            email
                        )));
                    }
                }
            }
        }

        dto.apply_to(&mut user);
        let user = self.repos.users().save(&user, actor).await?;
        info!(user_id = id, actor = actor.id, "User updated");
        Ok(user)
    }

    /// Delete the user together with its roles and its site.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.users().delete_cascade(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Detach a role from its owner; the orphaned role is deleted when the
    /// owner is saved. Detaching an ownerless role does nothing.
    pub async fn detach_role(&self, actor: Actor, role_id: i64) -> DomainResult<()> {
        let role = self
            .repos
            .roles()
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", role_id))?;

        let Some(owner_id) = role.user_id else {
            debug!(role_id, "Role has no owner, nothing to detach");
            return Ok(());
        };

        let mut owner = self.get_by_id(owner_id).await?;
        owner.detach_role(role_id);
        self.repos.users().save(&owner, actor).await?;

        info!(role_id, user_id = owner_id, actor = actor.id, "Role detached");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_all_raw(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all_raw().await
    }

    pub async fn names_only(&self) -> DomainResult<Vec<Option<String>>> {
        self.repos.users().find_names().await
    }

    /// Case-insensitive starts-with on name. An empty prefix matches everyone.
    pub async fn search_by_prefix(&self, prefix: &str) -> DomainResult<Vec<User>> {
        self.repos.users().search_by_prefix(prefix).await
    }

    pub async fn search_by_prefix_and_age(
        &self,
        prefix: &str,
        age: i32,
    ) -> DomainResult<Vec<UserSummary>> {
        self.repos
            .users()
            .search_by_prefix_and_age(prefix, age)
            .await
    }

    pub async fn ordered_by_salary_desc(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_ordered_by_salary_desc().await
    }

    pub async fn find_by_names(&self, names: &[String]) -> DomainResult<Vec<User>> {
        self.repos.users().find_by_names(names).await
    }

    pub async fn count_by_age_greater_than(&self, age: i32) -> DomainResult<u64> {
        self.repos.users().count_by_age_greater_than(age).await
    }

    /// Users with `min <= salary <= max`.
    pub async fn find_by_salary_range(&self, min: f64, max: f64) -> DomainResult<Vec<User>> {
        if min.is_nan() || max.is_nan() {
            return Err(DomainError::Validation("salary bounds must be numbers".into()));
        }
        if min > max {
            return Err(DomainError::Validation(format!(
                "min salary {} is greater than max salary {}",
                min, max
            )));
        }
        self.repos.users().find_by_salary_range(min, max).await
    }

    pub async fn find_with_null_name(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_with_null_name().await
    }

    pub async fn sum_salaries(&self) -> DomainResult<f64> {
        self.repos.users().sum_salaries().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sites::SiteService;
    use crate::domain::{CreateSiteDto, DEFAULT_ROLE_NAME};
    use crate::infrastructure::database::test_support::setup_db;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    const ACTOR: Actor = Actor { id: 1 };

    async fn services() -> (UserService, SiteService) {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(setup_db().await));
        (UserService::new(repos.clone()), SiteService::new(repos))
    }

    fn request(name: Option<&str>, email: &str, age: i32, salary: f64) -> CreateUserDto {
        CreateUserDto {
            name: name.map(String::from),
            email: email.to_string(),
            age: Some(age),
            salary: Some(salary),
            ..Default::default()
        }
    }

    async fn seed_scenario(users: &UserService) {
        for dto in [
            request(Some("Ahmet"), "ahmet@example.com", 25, 50_000.0),
            request(Some("Mehmet"), "mehmet@example.com", 30, 60_000.0),
            request(Some("Ayşe"), "ayse@example.com", 28, 75_000.0),
            request(None, "anon@example.com", 40, 40_000.0),
        ] {
            users.create(ACTOR, dto).await.unwrap();
        }
    }

    fn ids(users: &[User]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    #[tokio::test]
    async fn create_attaches_single_default_role() {
        let (users, _) = services().await;
        let user = users
            .create(ACTOR, request(Some("Ahmet"), "ahmet@example.com", 25, 50_000.0))
            .await
            .unwrap();

        assert_eq!(user.roles.len(), 1);
        assert_eq!(user.roles[0].role_name, DEFAULT_ROLE_NAME);
        assert_eq!(user.roles[0].user_id, Some(user.id));

        let reloaded = users.get_by_id(user.id).await.unwrap();
        assert_eq!(reloaded.roles, user.roles);
    }

    #[tokio::test]
    async fn create_with_taken_email_is_conflict() {
        let (users, _) = services().await;
        users
            .create(ACTOR, request(Some("A"), "dup@example.com", 1, 1.0))
            .await
            .unwrap();
        let err = users
            .create(ACTOR, request(Some("B"), "dup@example.com", 2, 2.0))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn create_without_email_is_rejected() {
        let (users, _) = services().await;
        let err = users
            .create(ACTOR, request(Some("A"), "  ", 1, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn detach_role_removes_it_everywhere() {
        let (users, _) = services().await;
        let user = users
            .create(ACTOR, request(Some("Mehmet"), "m@example.com", 30, 60_000.0))
            .await
            .unwrap();
        let role_id = user.roles[0].id;

        users.detach_role(ACTOR, role_id).await.unwrap();

        let reloaded = users.get_by_id(user.id).await.unwrap();
        assert!(!reloaded.has_role(role_id));
        let err = users.detach_role(ACTOR, role_id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn detach_unknown_role_is_not_found() {
        let (users, _) = services().await;
        assert!(users.detach_role(ACTOR, 77).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn detach_ownerless_role_is_noop() {
        use crate::infrastructure::database::entities::role;
        use chrono::Utc;
        use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, Set};

        let db = setup_db().await;
        let users = UserService::new(Arc::new(SeaOrmRepositoryProvider::new(db.clone())));
        let now = Utc::now();
        let orphan = role::ActiveModel {
            id: NotSet,
            role_name: Set("ROLE_GUEST".into()),
            user_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            created_by: Set(None),
            updated_by: Set(None),
        }
        .insert(&db)
        .await
        .unwrap();

        users.detach_role(ACTOR, orphan.id).await.unwrap();
        users.detach_role(ACTOR, orphan.id).await.unwrap();

        let still_there = role::Entity::find_by_id(orphan.id).one(&db).await.unwrap();
        assert_eq!(still_there.map(|r| r.role_name).as_deref(), Some("ROLE_GUEST"));
    }

    #[tokio::test]
    async fn partial_update_changes_only_given_fields() {
        let (users, _) = services().await;
        let before = users
            .create(
                ACTOR,
                CreateUserDto {
                    name: Some("Mehmet".into()),
                    surname: Some("Yilmaz".into()),
                    email: "mehmet@example.com".into(),
                    age: Some(30),
                    salary: Some(60_000.0),
                    password: Some("secret".into()),
                },
            )
            .await
            .unwrap();

        let after = users
            .update(
                ACTOR,
                before.id,
                UpdateUserDto {
                    salary: Some(65_000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(after.salary, Some(65_000.0));
        assert_eq!(after.name, before.name);
        assert_eq!(after.surname, before.surname);
        assert_eq!(after.email, before.email);
        assert_eq!(after.age, before.age);
        assert_eq!(after.password, before.password);
        assert_eq!(after.roles, before.roles);
    }

    #[tokio::test]
    async fn update_to_foreign_email_is_conflict() {
        let (users, _) = services().await;
        users
            .create(ACTOR, request(Some("A"), "a@example.com", 1, 1.0))
            .await
            .unwrap();
        let b = users
            .create(ACTOR, request(Some("B"), "b@example.com", 2, 2.0))
            .await
            .unwrap();

        let err = users
            .update(
                ACTOR,
                b.id,
                UpdateUserDto {
                    email: Some("a@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let (users, _) = services().await;
        let err = users
            .update(ACTOR, 9, UpdateUserDto::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_cascades_to_roles_and_site() {
        let (users, sites) = services().await;
        let user = users
            .create(ACTOR, request(Some("Ayşe"), "ayse@example.com", 28, 75_000.0))
            .await
            .unwrap();
        let role_id = user.roles[0].id;
        let site = sites
            .create(
                ACTOR,
                CreateSiteDto {
                    name: Some("Google".into()),
                    port: Some("8080".into()),
                    user_id: Some(user.id),
                },
            )
            .await
            .unwrap();

        users.delete(user.id).await.unwrap();

        assert!(users.get_by_id(user.id).await.unwrap_err().is_not_found());
        assert!(sites.get_by_id(site.id).await.unwrap_err().is_not_found());
        assert!(users.detach_role(ACTOR, role_id).await.unwrap_err().is_not_found());
        assert!(users.delete(user.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn query_operations_over_sample_users() {
        let (users, _) = services().await;
        seed_scenario(&users).await;

        let found = users.search_by_prefix("ah").await.unwrap();
        assert_eq!(ids(&found), vec![1]);
        assert_eq!(found[0].name.as_deref(), Some("Ahmet"));

        let ordered = users.ordered_by_salary_desc().await.unwrap();
        assert_eq!(ids(&ordered), vec![3, 2, 1, 4]);

        assert_eq!(users.count_by_age_greater_than(28).await.unwrap(), 2);

        let mut in_range = ids(&users.find_by_salary_range(45_000.0, 65_000.0).await.unwrap());
        in_range.sort_unstable();
        assert_eq!(in_range, vec![1, 2]);

        assert_eq!(ids(&users.find_with_null_name().await.unwrap()), vec![4]);
        assert_eq!(users.sum_salaries().await.unwrap(), 225_000.0);
    }

    #[tokio::test]
    async fn projections_and_name_lookups() {
        let (users, _) = services().await;
        seed_scenario(&users).await;

        let names = users.names_only().await.unwrap();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&None));

        let summaries = users.search_by_prefix_and_age("m", 30).await.unwrap();
        assert_eq!(
            summaries,
            vec![UserSummary {
                id: 2,
                name: Some("Mehmet".into()),
                age: Some(30),
            }]
        );
        assert!(users.search_by_prefix_and_age("m", 31).await.unwrap().is_empty());

        let by_name = users
            .find_by_names(&["Mehmet".into(), "Mehmet".into(), "Nobody".into()])
            .await
            .unwrap();
        assert_eq!(ids(&by_name), vec![2]);
        assert!(users.find_by_names(&[]).await.unwrap().is_empty());

        assert_eq!(users.search_by_prefix("").await.unwrap().len(), 4);
        assert_eq!(users.list_all_raw().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn inverted_salary_range_is_rejected() {
        let (users, _) = services().await;
        let err = users
            .find_by_salary_range(65_000.0, 45_000.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
