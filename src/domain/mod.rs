//! Domain layer: entities, DTOs and repository interfaces

pub mod audit;
pub mod repositories;
pub mod role;
pub mod site;
pub mod user;

// Re-export commonly used types
pub use audit::{Actor, AuditStamp};
pub use repositories::RepositoryProvider;
pub use role::{NewRole, Role, RoleRepository, DEFAULT_ROLE_NAME};
pub use site::{CreateSiteDto, Site, SiteDraft, SiteRepository, UpdateSiteDto};
pub use user::{CreateUserDto, UpdateUserDto, User, UserDraft, UserRepository, UserSummary};

pub use crate::shared::errors::{DomainError, DomainResult};
