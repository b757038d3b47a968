//! # Remote Fetch Client
//!
//! Read-only HTTP GET of the two JSON documents the app consumes: the daily
//! canteen menu and the bar product catalogue. No retry, no caching.
//!
//! Faults never escape this boundary: any network or decode failure is
//! logged and replaced by a defined fallback value (a placeholder menu or an
//! empty product list), so the layers above never observe a raw network
//! error.

use crate::config::Config;
use crate::dto::{DailyMenu, Product};
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the fixed remote document URLs.
pub struct RemoteClient {
    http: Client,
    menu_url: String,
    products_url: String,
}

impl RemoteClient {
    /// Create a new client with timeout configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            menu_url: config.menu_url.clone(),
            products_url: config.products_url.clone(),
        })
    }

    /// Fetch the daily menu, substituting the placeholder menu on failure.
    pub async fn fetch_menu(&self) -> DailyMenu {
        match self.get_menu().await {
            Ok(menu) => {
                debug!("Fetched daily menu");
                menu
            }
            Err(e) => {
                warn!("Failed to fetch daily menu, using fallback: {}", e);
                DailyMenu::network_error()
            }
        }
    }

    /// Fetch the bar catalogue, substituting an empty list on failure.
    pub async fn fetch_products(&self) -> Vec<Product> {
        match self.get_products().await {
            Ok(products) => {
                debug!("Fetched {} bar products", products.len());
                products
            }
            Err(e) => {
                warn!("Failed to fetch bar products, using fallback: {}", e);
                Vec::new()
            }
        }
    }

    async fn get_menu(&self) -> Result<DailyMenu> {
        let menu = self
            .http
            .get(&self.menu_url)
            .send()
            .await?
            .error_for_status()?
            .json::<DailyMenu>()
            .await?;

        Ok(menu)
    }

    async fn get_products(&self) -> Result<Vec<Product>> {
        let products = self
            .http
            .get(&self.products_url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Product>>()
            .await?;

        Ok(products)
    }
}
