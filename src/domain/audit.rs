//! Audit identity and timestamps shared by every persisted record

use chrono::{DateTime, Utc};

/// Whoever performs a mutation.
///
/// Passed explicitly through every mutating service call and written to the
/// `created_by` / `updated_by` columns. The REST layer currently supplies a
/// configured constant until an identity provider exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
}

impl Actor {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Creation / modification bookkeeping attached to users, roles and sites.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditStamp {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
}
