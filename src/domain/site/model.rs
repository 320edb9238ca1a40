//! Site domain entity

use crate::domain::AuditStamp;

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: i64,
    pub name: Option<String>,
    /// Free text, not checked to be numeric
    pub port: Option<String>,
    /// Owning user; unique across all sites
    pub user_id: i64,
    pub audit: AuditStamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDraft {
    pub name: Option<String>,
    pub port: Option<String>,
    pub user_id: i64,
}
