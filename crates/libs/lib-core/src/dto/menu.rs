//! # Daily Menu Document
//!
//! Shape of the remotely hosted canteen menu: four fixed dish slots.

use serde::{Deserialize, Serialize};

/// One dish slot of the daily menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub ingredients: String,
    /// Price in fractional euros, as published by the remote document.
    pub price: f64,
}

impl Dish {
    /// Placeholder dish substituted when the menu cannot be fetched.
    pub fn network_error() -> Self {
        Self {
            name: "Network error".to_string(),
            ingredients: "No data".to_string(),
            price: 0.0,
        }
    }
}

/// The daily menu: soup, meat, fish, and diet option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMenu {
    pub soup: Dish,
    pub meat: Dish,
    pub fish: Dish,
    pub diet: Dish,
}

impl DailyMenu {
    /// Fallback menu shown when the remote fetch fails: every slot reads as
    /// an explicit network-error placeholder with zero price.
    pub fn network_error() -> Self {
        Self {
            soup: Dish::network_error(),
            meat: Dish::network_error(),
            fish: Dish::network_error(),
            diet: Dish::network_error(),
        }
    }
}
