//! # Wallet Repository
//!
//! Database access layer for the per-user prepaid wallet.
//!
//! A wallet row shares its primary key with the owning user (structural 1:1)
//! and holds the balance in integer euro-cents. Balance changes are a full
//! overwrite computed by the caller; the transaction service is responsible
//! for serializing the read-modify-write sequence per user.

use super::models::Wallet;
use sqlx::{query_as, Sqlite};

/// Wallet repository for database operations.
pub struct WalletRepository;

impl WalletRepository {
    /// Find the wallet owned by a user.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Wallet))` - Wallet found for that user
    /// * `Ok(None)` - No wallet row for that user
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_user_id(
        executor: impl sqlx::Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<Option<Wallet>, sqlx::Error> {
        query_as::<_, Wallet>("SELECT * FROM wallet WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Create a zero-balance wallet for a user.
    ///
    /// The caller guarantees identifier uniqueness: the wallet key is the
    /// owning user's id.
    pub async fn create(
        executor: impl sqlx::Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO wallet (user_id, balance_cents) VALUES (?, 0)")
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Overwrite the wallet balance.
    ///
    /// Unconditional overwrite; the caller computed `new_balance_cents` from
    /// a prior read under its per-user lock.
    pub async fn set_balance(
        executor: impl sqlx::Executor<'_, Database = Sqlite>,
        user_id: i64,
        new_balance_cents: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE wallet SET balance_cents = ? WHERE user_id = ?")
            .bind(new_balance_cents)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{run_migrations, DbPool};
    use super::*;

    async fn setup_test_db() -> DbPool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        run_migrations(&pool)
            .await
            .expect("Failed to apply migrations");

        pool
    }

    #[tokio::test]
    async fn test_create_wallet_starts_at_zero() {
        let pool = setup_test_db().await;

        WalletRepository::create(&pool, 1).await.unwrap();

        let wallet = WalletRepository::find_by_user_id(&pool, 1)
            .await
            .unwrap()
            .expect("Wallet should exist after creation");

        assert_eq!(wallet.user_id, 1);
        assert_eq!(wallet.balance_cents, 0);
    }

    #[tokio::test]
    async fn test_find_missing_wallet() {
        let pool = setup_test_db().await;

        let wallet = WalletRepository::find_by_user_id(&pool, 42).await.unwrap();

        assert!(wallet.is_none());
    }

    #[tokio::test]
    async fn test_set_balance_overwrites() {
        let pool = setup_test_db().await;

        WalletRepository::create(&pool, 1).await.unwrap();
        WalletRepository::set_balance(&pool, 1, 1000).await.unwrap();
        WalletRepository::set_balance(&pool, 1, 750).await.unwrap();

        let wallet = WalletRepository::find_by_user_id(&pool, 1)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(wallet.balance_cents, 750);
    }

    #[tokio::test]
    async fn test_duplicate_wallet_rejected() {
        let pool = setup_test_db().await;

        WalletRepository::create(&pool, 1).await.unwrap();
        let result = WalletRepository::create(&pool, 1).await;

        assert!(result.is_err());
    }
}
