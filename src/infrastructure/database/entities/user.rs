//! User entity for database

use sea_orm::entity::prelude::*;

/// User model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(nullable)]
    pub name: Option<String>,

    /// `name` lowercased in Rust; prefix search matches against it
    #[sea_orm(nullable)]
    pub name_folded: Option<String>,

    #[sea_orm(nullable)]
    pub surname: Option<String>,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(nullable)]
    pub age: Option<i32>,

    #[sea_orm(nullable)]
    pub salary: Option<f64>,

    /// Opaque, stored as received
    #[sea_orm(nullable)]
    pub password: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub created_by: Option<i64>,

    #[sea_orm(nullable)]
    pub updated_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role::Entity")]
    Roles,
    #[sea_orm(has_one = "super::site::Entity")]
    Site,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roles.def()
    }
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
