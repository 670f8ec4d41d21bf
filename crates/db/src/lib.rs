//! Persistence layer: connection pool, migrations, models and repositories.

pub mod models;
pub mod repositories;

use condo_core::error::CoreError;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Error from repository operations that enforce domain rules inside a
/// transaction (booking conflicts, status transitions).
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Maximum pooled connections per process.
const MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
