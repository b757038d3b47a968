//! # Presentation State Holders
//!
//! Thin reactive projections of service results for screens to observe,
//! built on `tokio::sync::watch` channels and decoupled from any rendering
//! layer. Every operation ends in a terminal state: failures surface as
//! short human-readable messages, never as panics or indefinite loading.

pub mod auth;
pub mod campus;

pub use auth::{AuthFlow, AuthPhase};
pub use campus::CampusData;
