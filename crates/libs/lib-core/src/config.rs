//! # Application Configuration
//!
//! Configuration loaded from environment variables, validated on startup to
//! fail fast if misconfigured. The value is constructed once in the binary
//! and injected into whatever needs it.

use std::env;

// Default remote document locations (read-only JSON hosted on GitHub Gist).
const DEFAULT_MENU_URL: &str = "https://gist.githubusercontent.com/JBelizard/ab8fb9f51a5a6cc8c7c19b131d74045a/raw/f06ad218abedeb85ea872002f694f18756787910/menu.json";
const DEFAULT_PRODUCTS_URL: &str = "https://gist.githubusercontent.com/JBelizard/4c2295142d2487b9a7d73d6ba31d6e10/raw/0c0f1fdf928d18460408d5e602a923eeaaf92ac3/products.json";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Path of the durable session file
    pub session_file: String,

    /// URL of the daily canteen menu document
    pub menu_url: String,

    /// URL of the bar product catalogue document
    pub products_url: String,

    /// Timeout applied to every remote fetch, in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, with local defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:data/ecocampus.db".to_string());

        let session_file = env::var("SESSION_FILE")
            .unwrap_or_else(|_| "data/session.json".to_string());

        let menu_url = env::var("MENU_URL").unwrap_or_else(|_| DEFAULT_MENU_URL.to_string());

        let products_url =
            env::var("PRODUCTS_URL").unwrap_or_else(|_| DEFAULT_PRODUCTS_URL.to_string());

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| "HTTP_TIMEOUT_SECS must be a valid number")?;

        Ok(Self {
            database_url,
            session_file,
            menu_url,
            products_url,
            http_timeout_secs,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.database_url.starts_with("sqlite:") {
            return Err("DATABASE_URL must be a sqlite: URL".to_string());
        }

        for (name, url) in [("MENU_URL", &self.menu_url), ("PRODUCTS_URL", &self.products_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{} must be an http(s) URL", name));
            }
        }

        if self.http_timeout_secs < 1 || self.http_timeout_secs > 120 {
            return Err("HTTP_TIMEOUT_SECS must be between 1 and 120".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            session_file: "session.json".to_string(),
            menu_url: DEFAULT_MENU_URL.to_string(),
            products_url: DEFAULT_PRODUCTS_URL.to_string(),
            http_timeout_secs: 10,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_database_url() {
        let mut config = base_config();
        config.database_url = "postgres://localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_timeout() {
        let mut config = base_config();
        config.http_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
