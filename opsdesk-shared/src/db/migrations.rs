//! Database migration runner
//!
//! Migrations are embedded from the `migrations/` directory at the crate
//! root and applied with sqlx's migration system. `run_migrations` is called
//! once at startup when the PostgreSQL backend is selected; it is a no-op if
//! the schema is already up to date.

use sqlx::PgPool;
use tracing::info;

/// Applies all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the database
/// connection is lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
