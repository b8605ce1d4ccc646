//! Chat session use case.
//!
//! Implements the request controller for one chat session: it owns the
//! conversation log and session state, gates sends on the locally held
//! credential, and serializes exactly one backend call at a time.
//!
//! Failure handling follows a fixed taxonomy: a 401-equivalent revokes
//! the local credential and asks for a new login; every other failure
//! surfaces as `last_error` and leaves authentication untouched. No
//! failure is retried automatically — retry is always a new explicit
//! send. A user message appended before a failed call is never rolled
//! back, so the log may contain a user entry with no assistant reply.

use crate::ports::auth_gateway::AuthGateway;
use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::credential_store::CredentialStore;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use sherpa_domain::{AuthToken, Conversation, Message, SessionState};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error message surfaced when the backend rejects the credential.
const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Placeholder shown when the backend returns an empty reply.
const EMPTY_REPLY: &str = "No response received";

/// Outcome of a single [`ChatSession::send`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Reply received and appended to the conversation.
    Replied,
    /// Input was empty or whitespace-only; nothing happened.
    Ignored,
    /// A request is already outstanding; this send was rejected, not
    /// queued.
    Busy,
    /// No locally held credential; a login prompt was requested and no
    /// network call was made.
    LoginRequired,
    /// The backend rejected the credential; it was revoked locally.
    SessionExpired,
    /// Transport, server, or decode failure; see `state().last_error()`.
    Failed,
}

/// Errors that can occur during login.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login failed: {0}")]
    Gateway(GatewayError),
}

/// One chat session: conversation log, session state, and the gates in
/// front of the backend.
///
/// The session holds the credential token in memory — read from the
/// store once at construction and refreshed only by an explicit login.
/// `send` takes `&mut self`, so the single-outstanding-request rule
/// needs no locking; the state machine still enforces it explicitly.
pub struct ChatSession {
    conversation: Conversation,
    state: SessionState,
    token: Option<AuthToken>,
    gateway: Arc<dyn ChatGateway>,
    auth: Arc<dyn AuthGateway>,
    credentials: Arc<dyn CredentialStore>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl ChatSession {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        auth: Arc<dyn AuthGateway>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let token = credentials.load();
        let state = SessionState::new(token.is_some());
        Self {
            conversation: Conversation::new(),
            state,
            token,
            gateway,
            auth,
            credentials,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    /// Attach a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Send one user message through the backend.
    ///
    /// At most one call is outstanding at any time; a send while a call
    /// is pending returns [`SendOutcome::Busy`] without touching the
    /// conversation.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        if self.state.is_loading() {
            debug!("send rejected: request already outstanding");
            return SendOutcome::Busy;
        }

        if self.token.is_none() {
            debug!("send rejected: not authenticated");
            self.state.request_login();
            return SendOutcome::LoginRequired;
        }

        self.conversation.append(Message::user(text));
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "content": text }),
        ));

        // Cannot be rejected: loading was checked above.
        let started = self.state.try_begin_request();
        debug_assert!(started);

        match self.gateway.send_chat(text, self.token.as_ref()).await {
            Ok(reply) => {
                let content = if reply.trim().is_empty() {
                    EMPTY_REPLY.to_string()
                } else {
                    reply
                };
                info!("reply received ({} bytes)", content.len());
                self.transcript.log(TranscriptEvent::new(
                    "assistant_reply",
                    serde_json::json!({ "content": content }),
                ));
                self.conversation.append(Message::assistant(content));
                self.state.finish_success();
                SendOutcome::Replied
            }
            Err(e) if e.is_unauthorized() => {
                // The user message stays in the log; only the local
                // credential belief is dropped.
                warn!("backend rejected credential; revoking");
                if let Err(err) = self.credentials.clear() {
                    warn!("could not clear stored credential: {}", err);
                }
                self.token = None;
                self.state.revoke(SESSION_EXPIRED);
                self.transcript.log(TranscriptEvent::new(
                    "chat_error",
                    serde_json::json!({ "kind": "unauthorized" }),
                ));
                SendOutcome::SessionExpired
            }
            Err(e) => {
                warn!("chat request failed: {}", e);
                self.transcript.log(TranscriptEvent::new(
                    "chat_error",
                    serde_json::json!({ "kind": "transport", "message": e.to_string() }),
                ));
                self.state.finish_failure(e.to_string());
                SendOutcome::Failed
            }
        }
    }

    /// Log in against the backend and persist the resulting token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        let token = self.auth.login(username, password).await.map_err(|e| {
            if e.is_unauthorized() {
                LoginError::InvalidCredentials
            } else {
                LoginError::Gateway(e)
            }
        })?;

        if let Err(e) = self.credentials.store(&token) {
            // The in-memory token still works for this session.
            warn!("could not persist credential token: {}", e);
        }
        self.token = Some(token);
        self.state.authenticate();
        self.transcript.log(TranscriptEvent::new(
            "login",
            serde_json::json!({ "username": username }),
        ));
        info!("logged in as {}", username);
        Ok(())
    }

    /// Log out: forget the credential and reset the session.
    pub fn logout(&mut self) {
        if let Err(e) = self.credentials.clear() {
            warn!("could not clear stored credential: {}", e);
        }
        self.token = None;
        self.conversation.clear();
        self.state.reset();
        self.transcript
            .log(TranscriptEvent::new("logout", serde_json::json!({})));
    }

    /// Empty the conversation log without touching authentication.
    pub fn clear_conversation(&mut self) {
        self.conversation.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::credential_store::InMemoryCredentialStore;
    use async_trait::async_trait;
    use sherpa_domain::Role;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockGateway {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: AtomicUsize,
    }

    impl MockGateway {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatGateway for MockGateway {
        async fn send_chat(
            &self,
            _message: &str,
            _token: Option<&AuthToken>,
        ) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GatewayError::Connection("no more responses".to_string())))
        }
    }

    struct MockAuthGateway {
        result: Mutex<Option<Result<AuthToken, GatewayError>>>,
    }

    impl MockAuthGateway {
        fn accepting(token: &str) -> Self {
            Self {
                result: Mutex::new(Some(Ok(AuthToken::new(token)))),
            }
        }

        fn rejecting() -> Self {
            Self {
                result: Mutex::new(Some(Err(GatewayError::Unauthorized))),
            }
        }
    }

    #[async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn login(
            &self,
            _username: &str,
            _password: &str,
        ) -> Result<AuthToken, GatewayError> {
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(GatewayError::Unauthorized))
        }
    }

    fn authenticated_session(
        gateway: Arc<MockGateway>,
    ) -> ChatSession {
        let credentials = Arc::new(InMemoryCredentialStore::with_token(AuthToken::new("tok")));
        ChatSession::new(gateway, Arc::new(MockAuthGateway::rejecting()), credentials)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_successful_round_trip_appends_two_messages() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("hello!".to_string())]));
        let mut session = authenticated_session(gateway.clone());

        let outcome = session.send("hi").await;

        assert_eq!(outcome, SendOutcome::Replied);
        assert_eq!(gateway.calls(), 1);

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "hello!");

        assert!(!session.state().is_loading());
        assert!(session.state().last_error().is_none());
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_sends_are_ignored() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let mut session = authenticated_session(gateway.clone());

        assert_eq!(session.send("").await, SendOutcome::Ignored);
        assert_eq!(session.send("   ").await, SendOutcome::Ignored);

        assert!(session.conversation().is_empty());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_send_prompts_for_login() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("never sent".to_string())]));
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let mut session = ChatSession::new(
            gateway.clone(),
            Arc::new(MockAuthGateway::rejecting()),
            credentials,
        );

        let outcome = session.send("hello").await;

        assert_eq!(outcome, SendOutcome::LoginRequired);
        assert!(session.conversation().is_empty());
        assert_eq!(gateway.calls(), 0);
        assert!(session.state().wants_login());
    }

    #[tokio::test]
    async fn test_unauthorized_revokes_credential_but_keeps_user_message() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Unauthorized)]));
        let credentials = Arc::new(InMemoryCredentialStore::with_token(AuthToken::new("tok")));
        let mut session = ChatSession::new(
            gateway,
            Arc::new(MockAuthGateway::rejecting()),
            credentials.clone(),
        );

        let outcome = session.send("hi").await;

        assert_eq!(outcome, SendOutcome::SessionExpired);

        // The user message is NOT rolled back
        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);

        assert!(!session.state().is_authenticated());
        assert!(session.state().wants_login());
        assert_eq!(session.state().last_error(), Some(SESSION_EXPIRED));

        // The stored credential is gone too
        assert!(credentials.load().is_none());
    }

    #[tokio::test]
    async fn test_network_failure_keeps_authentication() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Connection(
            "connection refused".to_string(),
        ))]));
        let mut session = authenticated_session(gateway);

        let outcome = session.send("hi").await;

        assert_eq!(outcome, SendOutcome::Failed);
        assert_eq!(session.conversation().len(), 1);
        assert!(session.state().is_authenticated());
        assert!(session.state().last_error().unwrap().contains("connection refused"));
        assert!(!session.state().is_loading());
    }

    #[tokio::test]
    async fn test_send_while_pending_is_rejected() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let mut session = authenticated_session(gateway.clone());

        // Force the Pending phase as if a call were outstanding
        assert!(session.state.try_begin_request());

        let outcome = session.send("second").await;

        assert_eq!(outcome, SendOutcome::Busy);
        assert!(session.conversation().is_empty());
        assert_eq!(gateway.calls(), 0);
        assert!(session.state().is_loading());
    }

    #[tokio::test]
    async fn test_empty_reply_gets_placeholder() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("  ".to_string())]));
        let mut session = authenticated_session(gateway);

        assert_eq!(session.send("hi").await, SendOutcome::Replied);
        assert_eq!(session.conversation().last().unwrap().content, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_failure_then_retry_succeeds() {
        let gateway = Arc::new(MockGateway::new(vec![
            Err(GatewayError::Timeout),
            Ok("better late than never".to_string()),
        ]));
        let mut session = authenticated_session(gateway.clone());

        assert_eq!(session.send("hi").await, SendOutcome::Failed);
        // Retry is a new explicit send
        assert_eq!(session.send("hi again").await, SendOutcome::Replied);

        assert_eq!(gateway.calls(), 2);
        assert_eq!(session.conversation().len(), 3);
        assert!(session.state().last_error().is_none());
    }

    #[tokio::test]
    async fn test_login_stores_token_and_enables_send() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("welcome".to_string())]));
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let mut session = ChatSession::new(
            gateway,
            Arc::new(MockAuthGateway::accepting("fresh-token")),
            credentials.clone(),
        );

        assert_eq!(session.send("hi").await, SendOutcome::LoginRequired);

        session.login("admin", "admin123").await.unwrap();
        assert!(session.state().is_authenticated());
        assert_eq!(credentials.load().unwrap().as_str(), "fresh-token");

        assert_eq!(session.send("hi").await, SendOutcome::Replied);
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let mut session = ChatSession::new(
            gateway,
            Arc::new(MockAuthGateway::rejecting()),
            Arc::new(InMemoryCredentialStore::new()),
        );

        let result = session.login("admin", "wrong").await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
        assert!(!session.state().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("hello!".to_string())]));
        let credentials = Arc::new(InMemoryCredentialStore::with_token(AuthToken::new("tok")));
        let mut session = ChatSession::new(
            gateway,
            Arc::new(MockAuthGateway::rejecting()),
            credentials.clone(),
        );

        session.send("hi").await;
        assert_eq!(session.conversation().len(), 2);

        session.logout();

        assert!(session.conversation().is_empty());
        assert!(!session.state().is_authenticated());
        assert!(credentials.load().is_none());
    }
}
