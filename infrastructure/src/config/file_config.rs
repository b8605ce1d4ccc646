//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! and are deserialized directly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend endpoint settings
    pub backend: FileBackendConfig,
    /// Credential storage settings
    pub credentials: FileCredentialsConfig,
    /// Transcript logging settings
    pub transcript: FileTranscriptConfig,
    /// Interactive chat settings
    pub repl: FileReplConfig,
}

/// `[backend]` section: where the chat backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the backend API.
    pub base_url: String,
    /// Path of the chat endpoint under the base URL.
    pub chat_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            chat_path: "/ai/chat".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FileBackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[credentials]` section: where the token file lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCredentialsConfig {
    /// Override for the token file path. When unset, the platform
    /// config directory is used.
    pub path: Option<PathBuf>,
}

/// `[repl]` section: interactive chat settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Override for the REPL history file path. When unset, the
    /// platform data directory is used.
    pub history: Option<PathBuf>,
}

/// `[transcript]` section: JSONL transcript logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranscriptConfig {
    /// Enable writing a JSONL transcript of the session.
    pub enabled: bool,
    /// Override for the transcript file path.
    pub path: Option<PathBuf>,
}
