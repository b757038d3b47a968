use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity representing a complete account record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub student_number: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must already be hashed (`lib_auth::hash_password`).
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub name: String,
    pub email: String,
    pub student_number: String,
    pub password_hash: String,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(
        name: String,
        email: String,
        student_number: String,
        password_hash: String,
    ) -> Self {
        Self {
            name,
            email,
            student_number,
            password_hash,
        }
    }
}

/// Data structure for updating an existing user's profile.
///
/// All fields are optional - only provided fields will be updated. The
/// credential is deliberately absent: no caller ever updates it.
#[derive(Debug, Clone, Default)]
pub struct UserForUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub student_number: Option<String>,
}

impl UserForUpdate {
    /// Create a new empty `UserForUpdate` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the email.
    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    /// Set the student number.
    pub fn student_number(mut self, student_number: String) -> Self {
        self.student_number = Some(student_number);
        self
    }
}

/// Wallet entity: exactly one per user, keyed by the owner's id.
///
/// The balance is integer euro-cents and is never negative after any
/// completed operation.
#[derive(Debug, Clone, FromRow)]
pub struct Wallet {
    pub user_id: i64,
    pub balance_cents: i64,
}

/// Category tag of a purchase: canteen item or bar item.
///
/// Stored as the strings `"CANTINA"` / `"BAR"`; modeled as a closed enum so
/// an invalid category can never reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCategory {
    Cantina,
    Bar,
}

impl std::fmt::Display for OrderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderCategory::Cantina => write!(f, "CANTINA"),
            OrderCategory::Bar => write!(f, "BAR"),
        }
    }
}

impl std::str::FromStr for OrderCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CANTINA" => Ok(OrderCategory::Cantina),
            "BAR" => Ok(OrderCategory::Bar),
            _ => Err(format!("Invalid order category: {}", s)),
        }
    }
}

impl TryFrom<String> for OrderCategory {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Order entity: immutable ledger entry for one completed purchase.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub item_name: String,
    pub price_cents: i64,
    pub date: DateTime<Utc>,
    #[sqlx(rename = "type", try_from = "String")]
    pub category: OrderCategory,
}

/// Data structure for appending a new order row.
///
/// The creation instant is stamped by the repository at insert time.
#[derive(Debug, Clone)]
pub struct OrderForCreate {
    pub user_id: i64,
    pub item_name: String,
    pub price_cents: i64,
    pub category: OrderCategory,
}
