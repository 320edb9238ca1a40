//! Application layer: use-case services over the repository traits

pub mod sites;
pub mod users;

pub use sites::SiteService;
pub use users::UserService;
