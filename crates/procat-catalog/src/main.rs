//! procat-migrate: apply catalog schema migrations

use anyhow::{Context, Result};
use procat_catalog::{config::Config, db};
use procat_common::logging::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Dropping the guard flushes the file writer
    let _guard = init_logging(&config.logging)?;

    info!("Starting procat-migrate");

    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection pool established");

    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    info!("Database migrations completed");

    db::health_check(&pool).await?;
    info!("Database health check passed");

    pool.close().await;
    Ok(())
}
