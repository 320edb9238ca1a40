//! User domain entity

use crate::domain::role::{NewRole, Role};
use crate::domain::AuditStamp;

/// Persisted user together with the roles it owns
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub salary: Option<f64>,
    /// Stored exactly as received; hashing is not this layer's job.
    pub password: Option<String>,
    pub roles: Vec<Role>,
    /// Ids of roles detached since the user was loaded; the next save
    /// deletes them.
    pub detached_roles: Vec<i64>,
    pub audit: AuditStamp,
}

impl User {
    pub fn has_role(&self, role_id: i64) -> bool {
        self.roles.iter().any(|r| r.id == role_id)
    }

    /// Remove a role from this user's collection and clear its back-reference.
    ///
    /// Both sides of the link change together; the returned role is an
    /// orphan and is deleted once the user is saved.
    pub fn detach_role(&mut self, role_id: i64) -> Option<Role> {
        let pos = self.roles.iter().position(|r| r.id == role_id)?;
        let mut role = self.roles.remove(pos);
        role.user_id = None;
        self.detached_roles.push(role.id);
        Some(role)
    }
}

/// User about to be inserted, with the roles that are inserted alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub salary: Option<f64>,
    pub password: Option<String>,
    pub roles: Vec<NewRole>,
}

impl UserDraft {
    /// Attach a role before the draft is persisted; the owner is assigned on insert.
    pub fn attach_role(&mut self, role: NewRole) {
        self.roles.push(role);
    }
}

/// id/name/age projection returned by the combined prefix + age search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<i32>,
}
