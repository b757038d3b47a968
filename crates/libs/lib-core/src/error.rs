//! # Centralized Error Handling
//!
//! Application-wide error type [`AppError`] used across all core modules,
//! following the `thiserror` pattern.
//!
//! Business-rule failures (bad credentials, duplicate email, insufficient
//! balance) are recovered at the transaction-service boundary and surfaced
//! through [`AppError::user_message`]. Storage faults are fatal to the
//! in-flight operation and are never retried. Remote fetch faults never
//! escape the remote client boundary at all; the variant exists for the
//! client's internal plumbing.

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all failure scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// A registration or profile field failed validation.
    #[error("Validation failed for {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The email is already taken by an existing account.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A top-up or purchase amount was zero or negative.
    #[error("Amount must be positive")]
    InvalidAmount,

    /// Wallet balance is lower than the purchase price; nothing was changed.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// No wallet row exists for the user.
    #[error("Wallet not found for user {0}")]
    WalletNotFound(i64),

    /// Requested record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local store fault (disk/IO). Fatal to the operation, never retried.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote document fetch or decode failure.
    #[error("Remote fetch error: {0}")]
    RemoteFetch(String),

    /// Internal error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short human-readable message for the UI layer.
    ///
    /// Internal details are kept for logs; the user only sees a generic
    /// message for storage and internal faults.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::DuplicateEmail => {
                "This email is already registered. Please sign in.".to_string()
            }
            AppError::InvalidCredentials => {
                "Invalid credentials. Check your email or create an account.".to_string()
            }
            AppError::InvalidAmount => "The amount must be positive.".to_string(),
            AppError::InsufficientBalance => "Insufficient balance!".to_string(),
            AppError::WalletNotFound(_) => "Wallet not found.".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::RemoteFetch(_) => "Service temporarily unavailable".to_string(),
            AppError::Storage(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                AppError::Storage(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Storage(format!("Database error: {}", err)),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("JSON error: {}", err))
    }
}

/// Convert `reqwest::Error` to `AppError`.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RemoteFetch(err.to_string())
    }
}

/// Convert password-hashing errors to `AppError`.
impl From<lib_auth::PwdError> for AppError {
    fn from(err: lib_auth::PwdError) -> Self {
        AppError::Internal(err.to_string())
    }
}
