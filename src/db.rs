//! PostgreSQL pool and schema setup for the vault tables.
//!
//! Only used when `DATABASE_URL` is set; otherwise the server runs on
//! [`MemoryVaultStore`](crate::store::MemoryVaultStore).

use std::time::Duration;

use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

pub type DbPool = Pool<Postgres>;

/// Open the connection pool.
///
/// At most five connections. Acquiring one gives up after 10 seconds.
///
/// # Errors
///
/// Fails if the URL is invalid or the server rejects the connection.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

/// Create or upgrade the `api_keys` and `hackathons` tables.
///
/// Migrations are embedded at compile time from `migrations/` and tracked in
/// `_sqlx_migrations`, so restarts are no-ops.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
