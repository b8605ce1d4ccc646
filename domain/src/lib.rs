//! Domain layer for sherpa-chat
//!
//! This crate contains the core entities and the session state machine.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! An append-only, strictly chronological log of exchanged messages.
//! Entries are never reordered or mutated after insertion; the log is
//! only emptied wholesale on session reset.
//!
//! ## Session state machine
//!
//! A single-session state machine with two phases, **Idle** and
//! **Pending**. At most one backend request is outstanding at any time;
//! sends attempted while Pending are rejected rather than queued.

pub mod conversation;
pub mod session;

// Re-export commonly used types
pub use conversation::{
    entities::{Message, Role},
    store::Conversation,
};
pub use session::{credentials::AuthToken, state::SessionState};
