//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for sherpa-chat
#[derive(Parser, Debug)]
#[command(name = "sherpa-chat")]
#[command(author, version, about = "Terminal chat client for the Himalayan AI backend")]
#[command(long_about = r#"
Sherpa-chat talks to the Himalayan AI backend over HTTP. Messages are sent
one at a time: while a request is outstanding, further input is rejected
rather than queued.

Authentication uses a locally stored credential token, sent as a bearer
header. When the backend reports the session expired, the token is
forgotten and you are asked to /login again.

Configuration files are loaded from (in priority order):
1. SHERPA_* environment variables (e.g. SHERPA_BACKEND__BASE_URL)
2. --config <path>     Explicit config file
3. ./sherpa.toml       Project-level config
4. ~/.config/sherpa-chat/config.toml   Global config

Example:
  sherpa-chat --chat
  sherpa-chat "What services do you offer?"
  sherpa-chat --server https://api.example.com --chat
"#)]
pub struct Cli {
    /// Message to send in one-shot mode (not required in chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Backend base URL (overrides configuration)
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the spinner and banners
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_message() {
        let cli = Cli::parse_from(["sherpa-chat", "hello there"]);
        assert_eq!(cli.message.as_deref(), Some("hello there"));
        assert!(!cli.chat);
    }

    #[test]
    fn test_chat_mode_with_server_override() {
        let cli = Cli::parse_from(["sherpa-chat", "--chat", "--server", "https://api.example.com"]);
        assert!(cli.chat);
        assert_eq!(cli.server.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::parse_from(["sherpa-chat", "-vv", "--chat"]);
        assert_eq!(cli.verbose, 2);
    }
}
