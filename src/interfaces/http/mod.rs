//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `modules`: handlers and DTOs per resource
//! - `paths`: route constants
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod paths;
pub mod router;

pub use router::{create_api_router, ApiDoc, RouterSettings};
