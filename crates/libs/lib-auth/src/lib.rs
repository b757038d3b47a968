//! # Auth Library
//!
//! Password hashing for the local account store.

pub mod pwd;

pub use pwd::{hash_password, verify_password, PwdError};
