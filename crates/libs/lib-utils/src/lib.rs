//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, money amounts, and validation.

pub mod envs;
pub mod money;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_parse};
pub use money::{cents_from_euros, euros_from_cents, format_cents};
pub use time::{format_time, now_utc, parse_utc};
pub use validation::{validate_email, validate_min_length, validate_not_empty};
