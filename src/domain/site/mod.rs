//! Site aggregate
//!
//! A site belongs to exactly one user and a user owns at most one site.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateSiteDto, UpdateSiteDto};
pub use model::{Site, SiteDraft};
pub use repository::SiteRepository;
