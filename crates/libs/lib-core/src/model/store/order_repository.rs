//! # Order Repository
//!
//! Database access layer for the append-only purchase ledger.
//!
//! Order rows are created only as the side effect of a successful purchase,
//! are immutable once written, and are never deleted. History reads return
//! the most recent entry first.

use super::models::{Order, OrderForCreate};
use chrono::Utc;
use sqlx::{query_as, Sqlite, SqliteConnection};

/// Order repository for database operations.
pub struct OrderRepository;

impl OrderRepository {
    /// Append a new order row, stamping the creation instant.
    ///
    /// # Arguments
    ///
    /// * `conn` - Database connection (or open transaction)
    /// * `order_data` - Item, price, owner, and category of the purchase
    ///
    /// # Returns
    ///
    /// * `Ok(Order)` - The appended row with its generated ID and timestamp
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn create(
        conn: &mut SqliteConnection,
        order_data: OrderForCreate,
    ) -> Result<Order, sqlx::Error> {
        let date = Utc::now();

        let result = sqlx::query(
            "INSERT INTO orders (user_id, item_name, price_cents, date, type) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order_data.user_id)
        .bind(&order_data.item_name)
        .bind(order_data.price_cents)
        .bind(date)
        .bind(order_data.category.to_string())
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// List a user's orders, most recent first.
    ///
    /// Ties on the timestamp are broken by insertion order (later row first).
    pub async fn list_by_user(
        executor: impl sqlx::Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<_, Order>("SELECT * FROM orders WHERE user_id = ? ORDER BY date DESC, id DESC")
            .bind(user_id)
            .fetch_all(executor)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::models::OrderCategory;
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

    fn soup(user_id: i64) -> OrderForCreate {
        OrderForCreate {
            user_id,
            item_name: "Sopa".to_string(),
            price_cents: 250,
            category: OrderCategory::Cantina,
        }
    }

    #[tokio::test]
    async fn test_create_order() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let order = OrderRepository::create(&mut conn, soup(1)).await.unwrap();

        assert_eq!(order.user_id, 1);
        assert_eq!(order.item_name, "Sopa");
        assert_eq!(order.price_cents, 250);
        assert_eq!(order.category, OrderCategory::Cantina);
    }

    #[tokio::test]
    async fn test_category_round_trip() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let mut coffee = soup(1);
        coffee.item_name = "Café".to_string();
        coffee.price_cents = 70;
        coffee.category = OrderCategory::Bar;
        OrderRepository::create(&mut conn, coffee).await.unwrap();
        drop(conn);

        let orders = OrderRepository::list_by_user(&pool, 1).await.unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].category, OrderCategory::Bar);
    }

    #[tokio::test]
    async fn test_history_most_recent_first() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        for i in 0..5 {
            let mut order = soup(1);
            order.item_name = format!("Item {}", i);
            OrderRepository::create(&mut conn, order).await.unwrap();
        }
        drop(conn);

        let orders = OrderRepository::list_by_user(&pool, 1).await.unwrap();

        // Reverse insertion order, even when timestamps collide.
        assert_eq!(orders.len(), 5);
        for (i, order) in orders.iter().enumerate() {
            assert_eq!(order.item_name, format!("Item {}", 4 - i));
        }
    }

    #[tokio::test]
    async fn test_history_is_per_user() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        OrderRepository::create(&mut conn, soup(1)).await.unwrap();
        OrderRepository::create(&mut conn, soup(2)).await.unwrap();
        drop(conn);

        let orders = OrderRepository::list_by_user(&pool, 1).await.unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].user_id, 1);
    }
}
