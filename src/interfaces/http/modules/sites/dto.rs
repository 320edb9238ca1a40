//! Site DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateSiteDto, Site, UpdateSiteDto};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SiteDto {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Site> for SiteDto {
    fn from(s: Site) -> Self {
        Self {
            id: s.id,
            name: s.name,
            port: s.port,
            user_id: s.user_id,
            created_at: s.audit.created_at,
            updated_at: s.audit.updated_at,
        }
    }
}

/// Create or update site request. `user_id` is required on create and
/// ignored on update.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct SiteRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 32))]
    pub port: Option<String>,
    pub user_id: Option<i64>,
}

impl From<SiteRequest> for CreateSiteDto {
    fn from(r: SiteRequest) -> Self {
        Self {
            name: r.name,
            port: r.port,
            user_id: r.user_id,
        }
    }
}

impl From<SiteRequest> for UpdateSiteDto {
    fn from(r: SiteRequest) -> Self {
        Self {
            name: r.name,
            port: r.port,
        }
    }
}
