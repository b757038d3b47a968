//! # Campus Data Holder
//!
//! Observable snapshots of everything the main screens show: the signed-in
//! user, their wallet and purchase history, the daily menu, and the bar
//! catalogue, plus a one-shot notice channel for user feedback after an
//! operation.

use lib_core::dto::{DailyMenu, Product};
use lib_core::model::store::models::{Order, OrderCategory, User, Wallet};
use lib_core::{RemoteClient, TransactionService};
use lib_utils::money::format_cents;
use std::sync::Arc;
use tokio::sync::watch;

/// Observable projection of the session user's data and the remote
/// catalogues.
pub struct CampusData {
    service: Arc<TransactionService>,
    remote: Arc<RemoteClient>,
    user_tx: watch::Sender<Option<User>>,
    wallet_tx: watch::Sender<Option<Wallet>>,
    menu_tx: watch::Sender<Option<DailyMenu>>,
    products_tx: watch::Sender<Vec<Product>>,
    orders_tx: watch::Sender<Vec<Order>>,
    notice_tx: watch::Sender<Option<String>>,
}

impl CampusData {
    pub fn new(service: Arc<TransactionService>, remote: Arc<RemoteClient>) -> Self {
        Self {
            service,
            remote,
            user_tx: watch::channel(None).0,
            wallet_tx: watch::channel(None).0,
            menu_tx: watch::channel(None).0,
            products_tx: watch::channel(Vec::new()).0,
            orders_tx: watch::channel(Vec::new()).0,
            notice_tx: watch::channel(None).0,
        }
    }

    // region: --- Subscriptions and snapshots

    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user_tx.subscribe()
    }

    pub fn subscribe_wallet(&self) -> watch::Receiver<Option<Wallet>> {
        self.wallet_tx.subscribe()
    }

    pub fn subscribe_menu(&self) -> watch::Receiver<Option<DailyMenu>> {
        self.menu_tx.subscribe()
    }

    pub fn subscribe_products(&self) -> watch::Receiver<Vec<Product>> {
        self.products_tx.subscribe()
    }

    pub fn subscribe_orders(&self) -> watch::Receiver<Vec<Order>> {
        self.orders_tx.subscribe()
    }

    pub fn subscribe_notice(&self) -> watch::Receiver<Option<String>> {
        self.notice_tx.subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.user_tx.borrow().clone()
    }

    pub fn wallet(&self) -> Option<Wallet> {
        self.wallet_tx.borrow().clone()
    }

    pub fn menu(&self) -> Option<DailyMenu> {
        self.menu_tx.borrow().clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products_tx.borrow().clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders_tx.borrow().clone()
    }

    pub fn notice(&self) -> Option<String> {
        self.notice_tx.borrow().clone()
    }

    /// Clear the notice after the UI has shown it.
    pub fn clear_notice(&self) {
        self.notice_tx.send_replace(None);
    }

    // endregion: --- Subscriptions and snapshots

    // region: --- Operations

    /// Reload user, wallet, and history snapshots for the session user.
    ///
    /// With no active session the user-bound snapshots are cleared.
    pub async fn refresh(&self) {
        let Some(user_id) = self.service.current_user_id() else {
            self.user_tx.send_replace(None);
            self.wallet_tx.send_replace(None);
            self.orders_tx.send_replace(Vec::new());
            return;
        };

        match self.service.current_user().await {
            Ok(user) => {
                self.user_tx.send_replace(user);
            }
            Err(e) => self.notify(e.user_message()),
        }

        match self.service.wallet(user_id).await {
            Ok(wallet) => {
                self.wallet_tx.send_replace(wallet);
            }
            Err(e) => self.notify(e.user_message()),
        }

        match self.service.purchase_history(user_id).await {
            Ok(orders) => {
                self.orders_tx.send_replace(orders);
            }
            Err(e) => self.notify(e.user_message()),
        }
    }

    /// Fetch the daily menu snapshot (fallback menu on failure).
    pub async fn load_menu(&self) {
        let menu = self.remote.fetch_menu().await;
        self.menu_tx.send_replace(Some(menu));
    }

    /// Fetch the bar catalogue snapshot (empty on failure).
    pub async fn load_products(&self) {
        let products = self.remote.fetch_products().await;
        self.products_tx.send_replace(products);
    }

    /// Top up the session user's wallet.
    pub async fn top_up(&self, amount_cents: i64) {
        let Some(user_id) = self.service.current_user_id() else {
            return;
        };

        match self.service.credit_wallet(user_id, amount_cents).await {
            Ok(_) => {
                self.refresh().await;
                self.notify(format!("Topped up {}!", format_cents(amount_cents)));
            }
            Err(e) => self.notify(e.user_message()),
        }
    }

    /// Buy an item for the session user.
    pub async fn buy(&self, item_name: &str, price_cents: i64, category: OrderCategory) {
        let Some(user_id) = self.service.current_user_id() else {
            return;
        };

        match self
            .service
            .process_purchase(user_id, item_name, price_cents, category)
            .await
        {
            Ok(receipt) => {
                self.refresh().await;
                self.notify(format!("Purchase complete: {}", receipt.order.item_name));
            }
            Err(e) => self.notify(e.user_message()),
        }
    }

    /// Update the session user's profile.
    pub async fn update_profile(&self, name: &str, email: &str, student_number: &str) {
        let Some(user_id) = self.service.current_user_id() else {
            return;
        };

        match self
            .service
            .update_profile(user_id, name, email, student_number)
            .await
        {
            Ok(user) => {
                self.user_tx.send_replace(Some(user));
                self.notify("Profile updated!".to_string());
            }
            Err(e) => self.notify(e.user_message()),
        }
    }

    /// Clear the session and the user-bound snapshots.
    pub async fn logout(&self) {
        if let Err(e) = self.service.logout() {
            self.notify(e.user_message());
            return;
        }
        self.refresh().await;
    }

    // endregion: --- Operations

    fn notify(&self, message: String) {
        self.notice_tx.send_replace(Some(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::{run_migrations, Config, SessionStore};

    fn offline_config() -> Config {
        // Nothing listens on this address; remote fetches fall back.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        Config {
            database_url: "sqlite::memory:".to_string(),
            session_file: "session.json".to_string(),
            menu_url: format!("http://{}/menu.json", addr),
            products_url: format!("http://{}/products.json", addr),
            http_timeout_secs: 2,
        }
    }

    async fn setup_campus() -> (CampusData, Arc<TransactionService>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();

        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        run_migrations(&pool).await.expect("Failed to apply migrations");

        let session =
            Arc::new(SessionStore::open(dir.path().join("session.json")).unwrap());
        let service = Arc::new(TransactionService::new(pool, session));
        let remote = Arc::new(RemoteClient::new(&offline_config()).unwrap());

        (CampusData::new(service.clone(), remote), service, dir)
    }

    #[tokio::test]
    async fn test_refresh_without_session_clears_snapshots() {
        let (campus, _service, _dir) = setup_campus().await;

        campus.refresh().await;

        assert!(campus.user().is_none());
        assert!(campus.wallet().is_none());
        assert!(campus.orders().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_loads_session_user() {
        let (campus, service, _dir) = setup_campus().await;

        service.register("Ana", "12345", "ana@ipvc.pt", "1234").await.unwrap();
        campus.refresh().await;

        assert_eq!(campus.user().unwrap().name, "Ana");
        assert_eq!(campus.wallet().unwrap().balance_cents, 0);
    }

    #[tokio::test]
    async fn test_top_up_updates_wallet_and_notice() {
        let (campus, service, _dir) = setup_campus().await;

        service.register("Ana", "12345", "ana@ipvc.pt", "1234").await.unwrap();

        campus.top_up(1000).await;

        assert_eq!(campus.wallet().unwrap().balance_cents, 1000);
        assert_eq!(campus.notice(), Some("Topped up 10.00€!".to_string()));
    }

    #[tokio::test]
    async fn test_buy_with_insufficient_balance_notifies() {
        let (campus, service, _dir) = setup_campus().await;

        service.register("Ana", "12345", "ana@ipvc.pt", "1234").await.unwrap();
        campus.refresh().await;

        campus.buy("Sopa", 250, OrderCategory::Cantina).await;

        assert_eq!(campus.notice(), Some("Insufficient balance!".to_string()));
        assert_eq!(campus.wallet().unwrap().balance_cents, 0);
        assert!(campus.orders().is_empty());
    }

    #[tokio::test]
    async fn test_buy_updates_history_and_balance() {
        let (campus, service, _dir) = setup_campus().await;

        service.register("Ana", "12345", "ana@ipvc.pt", "1234").await.unwrap();
        campus.top_up(1000).await;

        // Remote documents carry fractional-euro prices; the screen converts
        // at the boundary.
        campus
            .buy("Sopa", lib_utils::money::cents_from_euros(2.50), OrderCategory::Cantina)
            .await;

        assert_eq!(campus.notice(), Some("Purchase complete: Sopa".to_string()));
        assert_eq!(campus.wallet().unwrap().balance_cents, 750);
        assert_eq!(campus.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_offline_menu_falls_back() {
        let (campus, _service, _dir) = setup_campus().await;

        campus.load_menu().await;
        campus.load_products().await;

        let menu = campus.menu().expect("Menu snapshot should be populated");
        assert_eq!(menu, DailyMenu::network_error());
        assert!(campus.products().is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_updates_snapshot() {
        let (campus, service, _dir) = setup_campus().await;

        service.register("Ana", "12345", "ana@ipvc.pt", "1234").await.unwrap();
        campus.refresh().await;

        campus.update_profile("Ana Silva", "ana@ipvc.pt", "54321").await;

        assert_eq!(campus.notice(), Some("Profile updated!".to_string()));
        let user = campus.user().unwrap();
        assert_eq!(user.name, "Ana Silva");
        assert_eq!(user.student_number, "54321");
    }

    #[tokio::test]
    async fn test_logout_clears_user_snapshots() {
        let (campus, service, _dir) = setup_campus().await;

        service.register("Ana", "12345", "ana@ipvc.pt", "1234").await.unwrap();
        campus.refresh().await;
        assert!(campus.user().is_some());

        campus.logout().await;

        assert!(campus.user().is_none());
        assert!(campus.wallet().is_none());
        assert!(campus.orders().is_empty());
    }

    #[tokio::test]
    async fn test_clear_notice() {
        let (campus, service, _dir) = setup_campus().await;

        service.register("Ana", "12345", "ana@ipvc.pt", "1234").await.unwrap();
        campus.top_up(500).await;
        assert!(campus.notice().is_some());

        campus.clear_notice();

        assert!(campus.notice().is_none());
    }
}
