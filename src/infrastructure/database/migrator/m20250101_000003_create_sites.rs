//! Create sites table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sites::Name).string())
                    .col(ColumnDef::new(Sites::Port).string())
                    // unique: a user owns at most one site
                    .col(ColumnDef::new(Sites::UserId).integer().not_null().unique_key())
                    .col(
                        ColumnDef::new(Sites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sites::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sites::CreatedBy).integer())
                    .col(ColumnDef::new(Sites::UpdatedBy).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sites_user")
                            .from(Sites::Table, Sites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sites::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Sites {
    Table,
    Id,
    Name,
    Port,
    UserId,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
