//! Configuration file loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileBackendConfig, FileConfig, FileCredentialsConfig, FileReplConfig, FileTranscriptConfig,
};
pub use loader::ConfigLoader;
