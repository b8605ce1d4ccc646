//! Application layer for sherpa-chat
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    auth_gateway::AuthGateway,
    chat_gateway::{ChatGateway, GatewayError},
    credential_store::{CredentialError, CredentialStore, InMemoryCredentialStore},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::chat_session::{ChatSession, LoginError, SendOutcome};
