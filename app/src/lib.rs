//! # EcoCampus App
//!
//! Presentation state holders and boot wiring over the campus core.

pub mod state;
