//! Wire types for the backend HTTP API
//!
//! The backend speaks plain JSON over HTTP:
//!
//! - `POST /ai/chat` with `{"message": ...}` → `{"reply": ...}`
//! - `POST /auth/login` with `{"username": ..., "password": ...}` →
//!   `{"token": ...}`

use serde::{Deserialize, Serialize};

/// Request body for the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Success payload from the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Success payload from the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginReply {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serializes_to_expected_shape() {
        let body = serde_json::to_value(ChatRequest { message: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "hi" }));
    }

    #[test]
    fn test_chat_reply_deserializes() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply": "hello!"}"#).unwrap();
        assert_eq!(reply.reply, "hello!");
    }

    #[test]
    fn test_chat_reply_missing_field_is_an_error() {
        let result = serde_json::from_str::<ChatReply>(r#"{"answer": "hello!"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_reply_deserializes() {
        let reply: LoginReply = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(reply.token, "abc");
    }
}
