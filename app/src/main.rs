//! # EcoCampus Binary
//!
//! Thin entry point: boots the core (config, store, migrations, session),
//! restores any persisted login, primes the observable snapshots, and logs
//! readiness. Screens and navigation live elsewhere; everything here is
//! usable headlessly.

use anyhow::Context;
use app::state::CampusData;
use lib_core::{create_pool, run_migrations, Config, RemoteClient, SessionStore, TransactionService};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    config.validate().map_err(anyhow::Error::msg)?;

    // The pool creates the database file, but not its parent directory.
    if let Some(path) = config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Failed to create database directory")?;
            }
        }
    }

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await.context("Failed to apply migrations")?;

    let session = Arc::new(SessionStore::open(&config.session_file)?);
    let remote = Arc::new(RemoteClient::new(&config)?);
    let service = Arc::new(TransactionService::new(pool, session));

    let campus = CampusData::new(service.clone(), remote);

    match service.current_user().await? {
        Some(user) => info!("Restored session for {} <{}>", user.name, user.email),
        None => info!("No active session; waiting for login"),
    }

    campus.load_menu().await;
    campus.load_products().await;
    campus.refresh().await;

    if let Some(menu) = campus.menu() {
        info!(
            "Today's menu: {} | {} | {} | {}",
            menu.soup.name, menu.meat.name, menu.fish.name, menu.diet.name
        );
    }
    info!("{} bar products available", campus.products().len());
    info!("Core ready");

    Ok(())
}
