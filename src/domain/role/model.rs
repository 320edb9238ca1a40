//! Role domain entity

use crate::domain::AuditStamp;

/// Name of the role every new user receives.
pub const DEFAULT_ROLE_NAME: &str = "ROLE_USER";

/// Persisted role
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i64,
    pub role_name: String,
    /// Owning user (the owning side of the user/role link)
    pub user_id: Option<i64>,
    pub audit: AuditStamp,
}

impl Role {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Role that has not been persisted yet; it receives its owner on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub role_name: String,
}

impl NewRole {
    pub fn named(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
        }
    }
}

impl Default for NewRole {
    fn default() -> Self {
        Self::named(DEFAULT_ROLE_NAME)
    }
}
