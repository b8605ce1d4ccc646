//! Auth gateway port
//!
//! Login against the backend's `/auth/login` endpoint. The chat core
//! only needs the resulting token; password handling stays behind this
//! port.

use super::chat_gateway::GatewayError;
use async_trait::async_trait;
use sherpa_domain::AuthToken;

/// Gateway to the backend login endpoint
///
/// A [`GatewayError::Unauthorized`] from `login` means the credentials
/// were rejected, not that a session expired.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange username/password for a credential token.
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, GatewayError>;
}
