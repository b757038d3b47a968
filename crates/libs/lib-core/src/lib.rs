//! # Core Library
//!
//! Core models, local store, session, remote fetch client, configuration,
//! and the wallet transaction service for the campus app.

pub mod config;
pub mod dto;
pub mod error;
pub mod model;
pub mod remote;
pub mod service;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, run_migrations, DbPool};
pub use remote::RemoteClient;
pub use service::TransactionService;
pub use session::SessionStore;
