//! Session state machine and credential token

pub mod credentials;
pub mod state;
