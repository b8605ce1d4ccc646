//! File-backed credential store.
//!
//! Persists the credential token as a single file at a fixed location,
//! default `<config_dir>/sherpa-chat/token`. Presence of the file is
//! what the auth gate sees; the contents are the opaque token string.

use sherpa_application::{CredentialError, CredentialStore};
use sherpa_domain::AuthToken;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Credential store writing the token to a single file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `<config_dir>/sherpa-chat/token`.
    /// Returns `None` when the platform has no config directory.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|d| Self::new(d.join("sherpa-chat").join("token")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<AuthToken> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            return None;
        }
        Some(AuthToken::new(token))
    }

    fn store(&self, token: &AuthToken) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CredentialError::StoreFailed(e.to_string()))?;
        }
        std::fs::write(&self.path, token.as_str())
            .map_err(|e| CredentialError::StoreFailed(e.to_string()))?;
        debug!("credential written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            // Nothing to clear is not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialError::ClearFailed(e.to_string())),
        }
    }
}
