//! Database entities module

pub mod role;
pub mod site;
pub mod user;

pub use role::Entity as Role;
pub use site::Entity as Site;
pub use user::Entity as User;
