//! # Device Session
//!
//! Durable record of which user is currently authenticated on the device,
//! persisted as a small JSON key-value document so login state survives a
//! process restart.
//!
//! The store is an explicitly constructed, injected object: `open` loads the
//! persisted state up front, so there is no "call init first" footgun. A
//! missing or unreadable file simply reads as logged out.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Persisted session document: `user_id` plus the logged-in flag, cleared
/// wholesale on logout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    user_id: Option<i64>,
    is_logged_in: bool,
}

/// Durable session store shared across the process.
///
/// Writes are infrequent and serialized by the app's single-flight
/// interaction model; a `Mutex` guards the in-memory copy for the shared
/// handle.
pub struct SessionStore {
    path: PathBuf,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Open the session store at `path`, restoring any persisted session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Session file is unreadable, starting logged out: {}", e);
                    SessionState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionState::default(),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read session file: {}",
                    e
                )))
            }
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Record a login, durably, overwriting any prior session.
    pub fn login(&self, user_id: i64) -> Result<()> {
        let mut state = self.lock_state();
        state.user_id = Some(user_id);
        state.is_logged_in = true;
        self.persist(&state)
    }

    /// Clear all session state, durably.
    pub fn logout(&self) -> Result<()> {
        let mut state = self.lock_state();
        *state = SessionState::default();

        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to clear session file: {}",
                e
            ))),
        }
    }

    /// Whether a user is currently logged in.
    pub fn is_logged_in(&self) -> bool {
        self.lock_state().is_logged_in
    }

    /// The authenticated user's id, if any.
    pub fn current_user_id(&self) -> Option<i64> {
        self.lock_state().user_id
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock only means another thread panicked mid-update;
        // the state itself is still a valid document.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Storage(format!("Failed to create session directory: {}", e))
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, raw)
            .map_err(|e| AppError::Storage(format!("Failed to write session file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("session.json")).expect("open should succeed")
    }

    #[test]
    fn test_fresh_store_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.is_logged_in());
        assert_eq!(store.current_user_id(), None);
    }

    #[test]
    fn test_login_then_logout() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.login(7).unwrap();
        assert!(store.is_logged_in());
        assert_eq!(store.current_user_id(), Some(7));

        store.logout().unwrap();
        assert!(!store.is_logged_in());
        assert_eq!(store.current_user_id(), None);
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        store_in(&dir).login(42).unwrap();

        // Simulated process restart.
        let reopened = store_in(&dir);
        assert!(reopened.is_logged_in());
        assert_eq!(reopened.current_user_id(), Some(42));
    }

    #[test]
    fn test_logout_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = store_in(&dir);
        store.login(42).unwrap();
        store.logout().unwrap();

        let reopened = store_in(&dir);
        assert!(!reopened.is_logged_in());
        assert_eq!(reopened.current_user_id(), None);
    }

    #[test]
    fn test_login_overwrites_prior_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.login(1).unwrap();
        store.login(2).unwrap();

        assert_eq!(store.current_user_id(), Some(2));
        assert_eq!(store_in(&dir).current_user_id(), Some(2));
    }

    #[test]
    fn test_corrupt_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SessionStore::open(&path).unwrap();
        assert!(!store.is_logged_in());
        assert_eq!(store.current_user_id(), None);
    }
}
