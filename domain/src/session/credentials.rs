//! Credential token value object

use serde::{Deserialize, Serialize};

/// Opaque credential token proving authentication (Value Object)
///
/// The token is owned by the caller and passed explicitly into the
/// gateway; nothing in this crate reads ambient storage. Presence of a
/// token is what the auth gate checks — validity is only ever decided
/// by the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

// Keep the secret out of logs and error messages.
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiJ9.secret");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_as_str_round_trip() {
        let token = AuthToken::new("abc123");
        assert_eq!(token.as_str(), "abc123");
    }
}
