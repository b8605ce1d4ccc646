//! Credential store port
//!
//! Local persistence of the credential token under a fixed location.
//! The store answers presence only — no local validity check is ever
//! performed; the backend is the sole judge of whether a token is still
//! good.

use sherpa_domain::AuthToken;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from the credential store
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to persist credential: {0}")]
    StoreFailed(String),

    #[error("Failed to clear credential: {0}")]
    ClearFailed(String),
}

/// Local credential token storage
pub trait CredentialStore: Send + Sync {
    /// Read the locally held token, if any.
    fn load(&self) -> Option<AuthToken>;

    /// Persist a token, replacing any previous one.
    fn store(&self, token: &AuthToken) -> Result<(), CredentialError>;

    /// Forget the token. Clearing an already-empty store succeeds.
    fn clear(&self) -> Result<(), CredentialError>;
}

/// In-memory implementation for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    token: Mutex<Option<AuthToken>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Option<AuthToken> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn store(&self, token: &AuthToken) -> Result<(), CredentialError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| CredentialError::StoreFailed(e.to_string()))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| CredentialError::ClearFailed(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
