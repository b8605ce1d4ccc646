//! Chat gateway port
//!
//! Defines the interface for the backend chat endpoint.

use async_trait::async_trait;
use sherpa_domain::AuthToken;
use thiserror::Error;

/// Errors that can occur when talking to the backend
///
/// The taxonomy mirrors how the session recovers: [`Unauthorized`]
/// revokes the local credential, everything else surfaces as a
/// transient failure the user may retry manually.
///
/// [`Unauthorized`]: GatewayError::Unauthorized
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request timeout")]
    Timeout,
}

impl GatewayError {
    /// Check whether this error must trigger credential revocation.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }
}

/// Gateway to the backend chat endpoint
///
/// One call corresponds to exactly one `POST {base}/ai/chat` with a
/// JSON `{"message": ...}` body. The token, when present, is sent as a
/// bearer header. Implementations live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one user message and return the assistant's reply text.
    async fn send_chat(
        &self,
        message: &str,
        token: Option<&AuthToken>,
    ) -> Result<String, GatewayError>;
}
