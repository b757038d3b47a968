//! # Local Store
//!
//! SQLite connection pool, schema migrations, and repository implementations
//! for the three record kinds: users, wallets, orders.

// region: --- Modules
pub mod models;
pub mod order_repository;
pub mod user_repository;
pub mod wallet_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use order_repository::OrderRepository;
pub use user_repository::UserRepository;
pub use wallet_repository::WalletRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool, creating the database file if absent.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
// endregion: --- Types and Functions
