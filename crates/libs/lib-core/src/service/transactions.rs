//! # Transaction Service
//!
//! Orchestrates authentication, registration, balance mutation, and purchase
//! processing against the local store. This is the only component with real
//! invariants:
//!
//! - every registered user gets exactly one zero-balance wallet, created in
//!   the same transaction as the account row;
//! - a wallet balance is never negative after any completed operation;
//! - every order row corresponds to exactly one completed purchase, written
//!   in the same transaction as its debit, with the debit sequenced first.
//!
//! Wallet mutations are serialized per user through an async lock map, so
//! two in-flight purchases for the same user can never both pass the balance
//! check against a stale read.

use crate::error::{AppError, Result};
use crate::model::store::models::{
    Order, OrderCategory, OrderForCreate, User, UserForCreate, UserForUpdate, Wallet,
};
use crate::model::store::{DbPool, OrderRepository, UserRepository, WalletRepository};
use crate::session::SessionStore;
use lib_auth::{hash_password, verify_password};
use lib_utils::money::format_cents;
use lib_utils::validation::{validate_email, validate_min_length, validate_not_empty};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// Result of a completed purchase: the appended ledger entry and the balance
/// left after the debit.
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    pub order: Order,
    pub new_balance_cents: i64,
}

/// Wallet and account orchestration over the local store.
pub struct TransactionService {
    pool: DbPool,
    session: Arc<SessionStore>,
    wallet_locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl TransactionService {
    /// Create a new service over the given pool and session store.
    pub fn new(pool: DbPool, session: Arc<SessionStore>) -> Self {
        Self {
            pool,
            session,
            wallet_locks: Mutex::new(HashMap::new()),
        }
    }

    // region: --- Authentication

    /// Authenticate with email and password, establishing the session.
    ///
    /// Fails with [`AppError::InvalidCredentials`] when no user matches the
    /// email or the password does not verify against the stored hash.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<i64> {
        debug!("[LOGIN] Looking up {}", email);
        let user = UserRepository::find_by_email(&self.pool, email).await?;

        let Some(user) = user else {
            warn!("[LOGIN] Unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("[LOGIN] Wrong password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        self.session.login(user.id)?;
        info!("[LOGIN] User {} authenticated", user.id);
        Ok(user.id)
    }

    /// Register a new account with a zero-balance wallet, establishing the
    /// session (auto-login).
    ///
    /// The user and wallet inserts run in one transaction: registration can
    /// never leave an account without a reachable wallet.
    pub async fn register(
        &self,
        name: &str,
        student_number: &str,
        email: &str,
        password: &str,
    ) -> Result<i64> {
        Self::validate_registration(name, student_number, email, password)?;

        if UserRepository::find_by_email(&self.pool, email)
            .await?
            .is_some()
        {
            warn!("[REGISTER] Email already registered");
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(password)?;
        let user_data = UserForCreate::new(
            name.to_string(),
            email.to_string(),
            student_number.to_string(),
            password_hash,
        );

        let mut tx = self.pool.begin().await?;

        // The UNIQUE constraint backstops the pre-check: a race loser gets
        // the same DuplicateEmail answer.
        let user = match UserRepository::create(&mut tx, user_data).await {
            Ok(user) => user,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("[REGISTER] Email already registered (constraint)");
                return Err(AppError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        };
        WalletRepository::create(&mut *tx, user.id).await?;

        tx.commit().await?;

        self.session.login(user.id)?;
        info!("[REGISTER] User {} created with zero-balance wallet", user.id);
        Ok(user.id)
    }

    /// Clear the device session. Account, wallet, and order rows remain.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()?;
        info!("[SESSION] Logged out");
        Ok(())
    }

    /// The authenticated user's id, if any.
    pub fn current_user_id(&self) -> Option<i64> {
        self.session.current_user_id()
    }

    /// Resolve the session to its full user record.
    pub async fn current_user(&self) -> Result<Option<User>> {
        let Some(user_id) = self.session.current_user_id() else {
            return Ok(None);
        };

        Ok(UserRepository::find_by_id(&self.pool, user_id).await?)
    }

    // endregion: --- Authentication

    // region: --- Profile

    /// Update a user's profile (name, email, student number).
    ///
    /// The credential is never touched by this path.
    pub async fn update_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
        student_number: &str,
    ) -> Result<User> {
        Self::required(name, "name")?;
        Self::required(email, "email")?;
        Self::required(student_number, "student number")?;
        validate_email(email).map_err(|message| AppError::Validation {
            field: "email",
            message,
        })?;

        let update = UserForUpdate::new()
            .name(name.to_string())
            .email(email.to_string())
            .student_number(student_number.to_string());

        let mut conn = self.pool.acquire().await?;
        let user = match UserRepository::update(&mut conn, user_id, update).await {
            Ok(user) => user,
            Err(sqlx::Error::RowNotFound) => {
                return Err(AppError::NotFound(format!("User {} not found", user_id)))
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(AppError::DuplicateEmail)
            }
            Err(e) => return Err(e.into()),
        };

        info!("[PROFILE] User {} updated", user.id);
        Ok(user)
    }

    // endregion: --- Profile

    // region: --- Wallet

    /// Look up a user's wallet.
    pub async fn wallet(&self, user_id: i64) -> Result<Option<Wallet>> {
        Ok(WalletRepository::find_by_user_id(&self.pool, user_id).await?)
    }

    /// Credit (top up) a wallet, returning the new balance in cents.
    ///
    /// Rejects non-positive amounts. A missing wallet row reads as balance
    /// zero and is created by the write (repair path).
    pub async fn credit_wallet(&self, user_id: i64, amount_cents: i64) -> Result<i64> {
        if amount_cents <= 0 {
            warn!("[WALLET] Rejected non-positive top-up for user {}", user_id);
            return Err(AppError::InvalidAmount);
        }

        let lock = self.wallet_lock(user_id);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await?;

        let current = match WalletRepository::find_by_user_id(&mut *tx, user_id).await? {
            Some(wallet) => wallet.balance_cents,
            None => {
                WalletRepository::create(&mut *tx, user_id).await?;
                0
            }
        };

        let new_balance = current + amount_cents;
        WalletRepository::set_balance(&mut *tx, user_id, new_balance).await?;

        tx.commit().await?;

        info!(
            "[WALLET] Credited {} to user {}, balance now {}",
            format_cents(amount_cents),
            user_id,
            format_cents(new_balance)
        );
        Ok(new_balance)
    }

    /// Process a purchase: balance check, debit, ledger append.
    ///
    /// Fails with [`AppError::WalletNotFound`] when no wallet row exists and
    /// [`AppError::InsufficientBalance`] when the balance does not cover the
    /// price; neither failure mutates anything.
    pub async fn process_purchase(
        &self,
        user_id: i64,
        item_name: &str,
        price_cents: i64,
        category: OrderCategory,
    ) -> Result<PurchaseReceipt> {
        if price_cents <= 0 {
            warn!("[PURCHASE] Rejected non-positive price for user {}", user_id);
            return Err(AppError::InvalidAmount);
        }

        let lock = self.wallet_lock(user_id);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await?;

        let wallet = WalletRepository::find_by_user_id(&mut *tx, user_id)
            .await?
            .ok_or(AppError::WalletNotFound(user_id))?;

        if wallet.balance_cents < price_cents {
            info!(
                "[PURCHASE] Insufficient balance for user {}: {} < {}",
                user_id,
                format_cents(wallet.balance_cents),
                format_cents(price_cents)
            );
            return Err(AppError::InsufficientBalance);
        }

        // Debit before appending the order: a fault between the two leaves a
        // debited balance with no order, never an order with no debit. The
        // transaction rolls back either way.
        let new_balance = wallet.balance_cents - price_cents;
        WalletRepository::set_balance(&mut *tx, user_id, new_balance).await?;

        let order = OrderRepository::create(
            &mut tx,
            OrderForCreate {
                user_id,
                item_name: item_name.to_string(),
                price_cents,
                category,
            },
        )
        .await?;

        tx.commit().await?;

        info!(
            "[PURCHASE] User {} bought {} for {}, balance now {}",
            user_id,
            order.item_name,
            format_cents(price_cents),
            format_cents(new_balance)
        );
        Ok(PurchaseReceipt {
            order,
            new_balance_cents: new_balance,
        })
    }

    /// A user's purchase history, most recent first.
    pub async fn purchase_history(&self, user_id: i64) -> Result<Vec<Order>> {
        Ok(OrderRepository::list_by_user(&self.pool, user_id).await?)
    }

    // endregion: --- Wallet

    // region: --- Internals

    fn wallet_lock(&self, user_id: i64) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .wallet_locks
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn required(value: &str, field: &'static str) -> Result<()> {
        validate_not_empty(value, field).map_err(|message| AppError::Validation { field, message })
    }

    fn validate_registration(
        name: &str,
        student_number: &str,
        email: &str,
        password: &str,
    ) -> Result<()> {
        Self::required(name, "name")?;
        Self::required(student_number, "student number")?;
        Self::required(email, "email")?;
        Self::required(password, "password")?;

        validate_email(email).map_err(|message| AppError::Validation {
            field: "email",
            message,
        })?;
        validate_min_length(password, 4, "password").map_err(|message| AppError::Validation {
            field: "password",
            message,
        })?;

        Ok(())
    }

    // endregion: --- Internals
}
