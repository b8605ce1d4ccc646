//! Session state machine
//!
//! Pure transition logic for a single chat session. The machine has two
//! phases — **Idle** (`loading == false`) and **Pending**
//! (`loading == true`) — and every transition is a plain method call,
//! so the whole state machine is testable without any IO.
//!
//! Invariant: `loading` is true for the entire duration of exactly one
//! outstanding backend call and false otherwise. There is no queue;
//! [`try_begin_request`](SessionState::try_begin_request) rejects a
//! second request while one is outstanding.

/// Mutable per-session state (Entity)
///
/// Mutated only by the request controller and the auth gate; exactly
/// one transition is in flight at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    authenticated: bool,
    loading: bool,
    login_prompt: bool,
    last_error: Option<String>,
}

impl SessionState {
    /// Start a session; `authenticated` reflects credential presence at
    /// session start.
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn wants_login(&self) -> bool {
        self.login_prompt
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Idle → Pending. Returns `false` if a request is already
    /// outstanding; the caller must not issue a network call in that
    /// case.
    pub fn try_begin_request(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.login_prompt = false;
        self.last_error = None;
        true
    }

    /// Pending → Idle on a well-formed reply.
    pub fn finish_success(&mut self) {
        self.loading = false;
        self.last_error = None;
    }

    /// Pending → Idle on a non-authentication failure. The session
    /// stays authenticated; retry is a new explicit send.
    pub fn finish_failure(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.last_error = Some(message.into());
    }

    /// Pending → Idle on a 401-equivalent. Local belief of being
    /// authenticated is dropped and a login prompt is requested.
    pub fn revoke(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.authenticated = false;
        self.login_prompt = true;
        self.last_error = Some(message.into());
    }

    /// An unauthenticated send was attempted; request a login prompt
    /// without touching anything else.
    pub fn request_login(&mut self) {
        self.login_prompt = true;
    }

    /// Login succeeded.
    pub fn authenticate(&mut self) {
        self.authenticated = true;
        self.login_prompt = false;
        self.last_error = None;
    }

    /// Logout / full session reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
