//! # Authentication Flow
//!
//! Observable state machine for the login/registration screens:
//! `Idle → Loading → {Success, Error}`. A terminal state must be returned to
//! `Idle` via [`AuthFlow::reset`] before a new attempt; a stale terminal
//! state is never reinterpreted as a new result.

use lib_core::TransactionService;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Phase of the authentication state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPhase {
    Idle,
    Loading,
    Success(i64),
    Error(String),
}

/// Observable authentication flow over the transaction service.
pub struct AuthFlow {
    service: Arc<TransactionService>,
    phase_tx: watch::Sender<AuthPhase>,
}

impl AuthFlow {
    pub fn new(service: Arc<TransactionService>) -> Self {
        let (phase_tx, _) = watch::channel(AuthPhase::Idle);
        Self { service, phase_tx }
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthPhase> {
        self.phase_tx.subscribe()
    }

    /// Snapshot of the current phase.
    pub fn phase(&self) -> AuthPhase {
        self.phase_tx.borrow().clone()
    }

    /// Return a terminal state to `Idle` so a new attempt can start.
    pub fn reset(&self) {
        self.phase_tx.send_replace(AuthPhase::Idle);
    }

    /// Attempt a login. Ignored unless the flow is `Idle`.
    pub async fn login(&self, email: &str, password: &str) {
        if self.phase() != AuthPhase::Idle {
            warn!("[AUTH] Login attempt ignored: flow not reset");
            return;
        }

        // Immediate local check before any IO.
        if email.trim().is_empty() || password.trim().is_empty() {
            self.phase_tx.send_replace(AuthPhase::Error(
                "Please fill in your email and password.".to_string(),
            ));
            return;
        }

        self.phase_tx.send_replace(AuthPhase::Loading);

        match self.service.authenticate(email, password).await {
            Ok(user_id) => {
                self.phase_tx.send_replace(AuthPhase::Success(user_id));
            }
            Err(e) => {
                self.phase_tx
                    .send_replace(AuthPhase::Error(e.user_message()));
            }
        }
    }

    /// Attempt a registration. Ignored unless the flow is `Idle`.
    pub async fn register(&self, name: &str, student_number: &str, email: &str, password: &str) {
        if self.phase() != AuthPhase::Idle {
            warn!("[AUTH] Registration attempt ignored: flow not reset");
            return;
        }

        if name.trim().is_empty()
            || student_number.trim().is_empty()
            || email.trim().is_empty()
            || password.trim().is_empty()
        {
            self.phase_tx
                .send_replace(AuthPhase::Error("All fields are required!".to_string()));
            return;
        }

        self.phase_tx.send_replace(AuthPhase::Loading);

        match self
            .service
            .register(name, student_number, email, password)
            .await
        {
            Ok(user_id) => {
                self.phase_tx.send_replace(AuthPhase::Success(user_id));
            }
            Err(e) => {
                self.phase_tx
                    .send_replace(AuthPhase::Error(e.user_message()));
            }
        }
    }
}
