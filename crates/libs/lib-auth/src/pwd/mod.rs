//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Credentials are stored as salted Argon2 hash strings; plaintext passwords
//! never reach the database. Password policy (minimum length and the like)
//! is enforced by the registration validation, not here.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PwdError {
    #[error("Failed to hash password: {0}")]
    HashFail(String),

    #[error("Stored password hash is malformed: {0}")]
    InvalidHashFormat(String),
}

/// Hash a password using the Argon2 algorithm with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PwdError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PwdError::HashFail(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PwdError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PwdError::InvalidHashFormat(e.to_string()))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
