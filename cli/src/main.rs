//! CLI entrypoint for sherpa-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use sherpa_application::{
    ChatSession, InMemoryCredentialStore, NoTranscriptLogger, SendOutcome, TranscriptLogger,
};
use sherpa_infrastructure::{
    ConfigLoader, FileConfig, FileCredentialStore, HttpChatGateway, JsonlTranscriptLogger,
};
use sherpa_presentation::{ChatRepl, Cli, ConsoleFormatter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let mut config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    if let Some(server) = cli.server {
        config.backend.base_url = server;
    }

    info!("Starting sherpa-chat against {}", config.backend.base_url);

    // === Dependency Injection ===
    let gateway = Arc::new(
        HttpChatGateway::new(config.backend.base_url.clone(), config.backend.timeout())?
            .with_chat_path(config.backend.chat_path.clone()),
    );

    let credentials: Arc<dyn sherpa_application::CredentialStore> =
        match &config.credentials.path {
            Some(path) => Arc::new(FileCredentialStore::new(path)),
            None => match FileCredentialStore::default_location() {
                Some(store) => Arc::new(store),
                None => Arc::new(InMemoryCredentialStore::new()),
            },
        };

    let transcript: Arc<dyn TranscriptLogger> = if config.transcript.enabled {
        let path = config
            .transcript
            .path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("sherpa-chat").join("session.jsonl")));
        match path.and_then(|p| JsonlTranscriptLogger::new(p)) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoTranscriptLogger),
        }
    } else {
        Arc::new(NoTranscriptLogger)
    };

    let mut session = ChatSession::new(gateway.clone(), gateway, credentials)
        .with_transcript_logger(transcript);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(session)
            .with_spinner(!cli.quiet)
            .with_history_path(config.repl.history.clone());
        repl.run().await?;
        return Ok(());
    }

    // One-shot mode - a message is required
    let message = match cli.message {
        Some(m) => m,
        None => bail!("Message is required. Use --chat for interactive mode."),
    };

    match session.send(&message).await {
        SendOutcome::Replied => {
            if let Some(reply) = session.conversation().last() {
                println!("{}", reply.content);
            }
            Ok(())
        }
        SendOutcome::LoginRequired => {
            bail!("Not logged in. Run with --chat and use /login first.")
        }
        SendOutcome::SessionExpired | SendOutcome::Failed => {
            let error = session
                .state()
                .last_error()
                .unwrap_or("request failed")
                .to_string();
            bail!(ConsoleFormatter::format_error(&error))
        }
        SendOutcome::Ignored => bail!("Message is empty."),
        SendOutcome::Busy => unreachable!("no request can be outstanding yet"),
    }
}
