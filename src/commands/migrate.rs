//! Database migration command.

use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_database::DatabasePool;
use portal_database::migration::run_migrations;

use crate::output;

/// Connect to the configured database and apply pending migrations.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    if !pool.health_check().await? {
        pool.close().await;
        return Err(AppError::internal("Database health check failed"));
    }
    run_migrations(pool.pool()).await?;
    pool.close().await;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
