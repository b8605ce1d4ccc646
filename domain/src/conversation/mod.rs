//! Conversation log: messages and the append-only store

pub mod entities;
pub mod store;
