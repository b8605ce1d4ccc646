//! HTTP adapter for the backend chat and login endpoints

pub mod gateway;
pub mod protocol;

pub use gateway::HttpChatGateway;
