//! # Data Transfer Objects (DTOs)
//!
//! Typed shapes of the two read-only remote documents the app consumes:
//! the daily canteen menu and the bar product catalogue. These are consumed,
//! never produced; any schema drift on the remote side surfaces as a decode
//! failure that the remote client maps to a fallback value.

pub mod catalog;
pub mod menu;

pub use catalog::*;
pub use menu::*;
