//! Port definitions (interfaces to the outside world)
//!
//! Adapters implementing these traits live in the infrastructure layer.

pub mod auth_gateway;
pub mod chat_gateway;
pub mod credential_store;
pub mod transcript_logger;
