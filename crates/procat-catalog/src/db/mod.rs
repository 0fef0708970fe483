//! Connection pool and schema management

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Embedded schema migrations from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors from pool setup, health checks and migrations
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type DbResult<T> = Result<T, DbError>;

pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    tracing::info!(count = MIGRATOR.iter().count(), "Database migrations applied");
    Ok(())
}
