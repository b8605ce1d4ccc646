//! reqwest-based implementation of the chat and auth gateway ports.
//!
//! Status mapping: 401 → [`GatewayError::Unauthorized`] (credential
//! revocation path), any other non-2xx → [`GatewayError::Http`],
//! client-side timeout → [`GatewayError::Timeout`], other transport
//! failures → [`GatewayError::Connection`], and a body that does not
//! decode into the expected payload → [`GatewayError::MalformedResponse`].

use super::protocol::{ChatReply, ChatRequest, LoginReply, LoginRequest};
use async_trait::async_trait;
use reqwest::StatusCode;
use sherpa_application::{AuthGateway, ChatGateway, GatewayError};
use sherpa_domain::AuthToken;
use std::time::Duration;
use tracing::debug;

/// Default chat endpoint path on the backend.
pub const DEFAULT_CHAT_PATH: &str = "/ai/chat";

/// Login endpoint path on the backend.
const LOGIN_PATH: &str = "/auth/login";

/// HTTP adapter for the backend API.
pub struct HttpChatGateway {
    client: reqwest::Client,
    base_url: String,
    chat_path: String,
}

impl HttpChatGateway {
    /// Build a gateway with a per-request timeout. Timeout behavior is
    /// delegated entirely to the transport layer.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
        })
    }

    /// Override the chat endpoint path (default: `/ai/chat`).
    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn send_chat(
        &self,
        message: &str,
        token: Option<&AuthToken>,
    ) -> Result<String, GatewayError> {
        let url = self.endpoint(&self.chat_path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url).json(&ChatRequest { message });
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(map_transport_error)?;

        if let Some(err) = error_for_status(response.status()) {
            return Err(err);
        }

        let payload: ChatReply = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(payload.reply)
    }
}

#[async_trait]
impl AuthGateway for HttpChatGateway {
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, GatewayError> {
        let url = self.endpoint(LOGIN_PATH);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(map_transport_error)?;

        if let Some(err) = error_for_status(response.status()) {
            return Err(err);
        }

        let payload: LoginReply = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(AuthToken::new(payload.token))
    }
}

/// Map a non-success status onto the gateway error taxonomy. Returns
/// `None` for 2xx.
fn error_for_status(status: StatusCode) -> Option<GatewayError> {
    if status.is_success() {
        return None;
    }
    if status == StatusCode::UNAUTHORIZED {
        return Some(GatewayError::Unauthorized);
    }
    Some(GatewayError::Http {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string(),
    })
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Connection(e.to_string())
    }
}

/// Join a base URL and a path without doubling or dropping the slash.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
