//! # Service Layer
//!
//! The transaction service: the one component with business invariants.

pub mod transactions;

pub use transactions::{PurchaseReceipt, TransactionService};
