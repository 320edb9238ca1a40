//! Fresh in-memory database with the schema applied, for tests

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use super::migrator::Migrator;
use super::{init_database, DatabaseConfig};

pub async fn setup_db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory())
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}
