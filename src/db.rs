use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let in_memory = database_url.contains(":memory:");

    let mut opt = ConnectOptions::new(database_url.to_string());
    opt.connect_timeout(Duration::from_secs(10)).sqlx_logging(false);
    if in_memory {
        // every pooled connection would otherwise get its own empty database
        opt.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opt).await?;

    let mut pragmas = vec!["PRAGMA foreign_keys=ON"];
    if !in_memory {
        pragmas.extend(["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"]);
    }
    for pragma in pragmas {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    migration::Migrator::up(&db, None).await?;
    tracing::info!(in_memory, "database connected, migrations applied");

    Ok(db)
}
