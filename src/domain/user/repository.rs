use async_trait::async_trait;

use super::{User, UserDraft, UserSummary};
use crate::domain::{Actor, DomainResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<User>>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn exists(&self, id: i64) -> DomainResult<bool>;

    /// Insert the user and every role attached to the draft in one transaction.
    async fn insert(&self, draft: UserDraft, actor: Actor) -> DomainResult<User>;

    /// Persist the scalar fields of `user` and delete the roles listed in
    /// `user.detached_roles` in the same transaction. The returned user
    /// carries the roles the store holds after the commit.
    async fn save(&self, user: &User, actor: Actor) -> DomainResult<User>;

    /// Delete the user, its roles and its site in one transaction.
    async fn delete_cascade(&self, id: i64) -> DomainResult<()>;

    // ── Queries ─────────────────────────────────────────────────

    /// Same result as `find_all`, issued as a hand-written full-table statement.
    async fn find_all_raw(&self) -> DomainResult<Vec<User>>;
    async fn find_names(&self) -> DomainResult<Vec<Option<String>>>;
    async fn search_by_prefix(&self, prefix: &str) -> DomainResult<Vec<User>>;
    async fn search_by_prefix_and_age(
        &self,
        prefix: &str,
        age: i32,
    ) -> DomainResult<Vec<UserSummary>>;
    async fn find_ordered_by_salary_desc(&self) -> DomainResult<Vec<User>>;
    async fn find_by_names(&self, names: &[String]) -> DomainResult<Vec<User>>;
    async fn count_by_age_greater_than(&self, age: i32) -> DomainResult<u64>;
    async fn find_by_salary_range(&self, min: f64, max: f64) -> DomainResult<Vec<User>>;
    async fn find_with_null_name(&self) -> DomainResult<Vec<User>>;
    /// Sum of non-null salaries; `0.0` when there is nothing to sum.
    async fn sum_salaries(&self) -> DomainResult<f64>;
}
