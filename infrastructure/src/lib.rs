//! Infrastructure layer for sherpa-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credentials;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileBackendConfig, FileConfig, FileReplConfig, FileTranscriptConfig};
pub use credentials::FileCredentialStore;
pub use http::HttpChatGateway;
pub use logging::JsonlTranscriptLogger;
