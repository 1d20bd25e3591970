//! Durable job storage.
//!
//! [`repositories::JobRepo`] holds the SQL; [`store::JobStore`] is the seam
//! the engine depends on, with a PostgreSQL implementation for production and
//! an in-memory one for tests and local runs.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::{JobStore, MemoryJobStore, PgJobStore};

pub type DbPool = sqlx::PgPool;

/// Recycle pooled connections after this long.
const CONNECTION_MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Errors surfaced by a [`JobStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Create a connection pool from a database URL.
///
/// `max_connections` caps simultaneously open connections; callers beyond
/// the cap wait for a free connection instead of failing.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .max_lifetime(CONNECTION_MAX_LIFETIME)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
