//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! This module implements the repository pattern for user data access,
//! providing a clean abstraction over SQL queries. Single-query methods are
//! generic over the executor so the transaction service can run them inside
//! one transaction; multi-query methods take a connection for the same
//! reason.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, UserRepository};
//! # async fn example() -> Result<(), sqlx::Error> {
//! # let pool = create_pool("sqlite:data/ecocampus.db").await.unwrap();
//! // Find a user by email
//! let found = UserRepository::find_by_email(&pool, "ana@ipvc.pt").await?;
//! assert!(found.is_none());
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate, UserForUpdate};
use sqlx::{query_as, Sqlite, SqliteConnection};

/// User repository for database operations.
///
/// Provides methods for creating, retrieving, and updating user records.
/// All methods are async and return `Result` types for proper error handling.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address.
    ///
    /// Exact string match; no case normalization is applied.
    ///
    /// # Arguments
    ///
    /// * `executor` - Connection pool, connection, or open transaction
    /// * `email` - The email address to search for
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_email(
        executor: impl sqlx::Executor<'_, Database = Sqlite>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by their unique identifier.
    ///
    /// # Arguments
    ///
    /// * `executor` - Connection pool, connection, or open transaction
    /// * `id` - The user ID to search for
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching id
    /// * `Ok(None)` - No user found with that id
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_id(
        executor: impl sqlx::Executor<'_, Database = Sqlite>,
        id: i64,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Create a new user in the database.
    ///
    /// # Arguments
    ///
    /// * `conn` - Database connection (or open transaction)
    /// * `user_data` - The fields of the new account; password already hashed
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The newly created user with its generated ID
    /// * `Err(sqlx::Error)` - Database error occurred
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Email already exists (UNIQUE constraint violation)
    /// - Database connection fails
    pub async fn create(
        conn: &mut SqliteConnection,
        user_data: UserForCreate,
    ) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, student_number, password_hash) VALUES (?, ?, ?, ?)",
        )
        .bind(&user_data.name)
        .bind(&user_data.email)
        .bind(&user_data.student_number)
        .bind(&user_data.password_hash)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Update an existing user's profile using `UserForUpdate`.
    ///
    /// Only fields that are `Some` in `user_data` will be updated; the
    /// credential is never touched by this method.
    ///
    /// # Arguments
    ///
    /// * `conn` - Database connection (or open transaction)
    /// * `id` - The user ID to update
    /// * `user_data` - The update data (only `Some` fields will be updated)
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The updated user
    /// * `Err(sqlx::Error::RowNotFound)` - No user exists with that id
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        user_data: UserForUpdate,
    ) -> Result<User, sqlx::Error> {
        // Build update query dynamically
        let mut updates = Vec::new();

        if user_data.name.is_some() {
            updates.push("name = ?");
        }
        if user_data.email.is_some() {
            updates.push("email = ?");
        }
        if user_data.student_number.is_some() {
            updates.push("student_number = ?");
        }

        if updates.is_empty() {
            // No updates, just return the existing user
            return query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(&mut *conn)
                .await;
        }

        let query_str = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);

        if let Some(ref name) = user_data.name {
            query = query.bind(name);
        }
        if let Some(ref email) = user_data.email {
            query = query.bind(email);
        }
        if let Some(ref student_number) = user_data.student_number {
            query = query.bind(student_number);
        }

        query.bind(id).execute(&mut *conn).await?;

        // fetch_one reports an absent id as RowNotFound
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }
}
