//! # Bar Catalogue Document
//!
//! Shape of the remotely hosted bar product list.

use serde::{Deserialize, Serialize};

/// One product of the bar catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Price in fractional euros, as published by the remote document.
    pub price: f64,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
}
