//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, DefaultEditor, Editor, Helper, Hinter, Result as RlResult, Validator};
use sherpa_application::{ChatSession, SendOutcome};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Interactive chat REPL
///
/// Owns the chat session exclusively, which matches the session's
/// single-threaded model: the one suspension point is the outstanding
/// backend call, and no second send can be issued while it runs.
pub struct ChatRepl {
    session: ChatSession,
    show_spinner: bool,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            show_spinner: true,
            history_path: None,
        }
    }

    /// Set whether to show a spinner while a request is outstanding
    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    /// Override the history file location (default: platform data dir)
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = resolve_history_path(self.history_path.as_deref());

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(&line, &mut rl).await {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(&line);

                    self.process_message(&line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Sherpa Chat - Himalayan AI         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if !self.session.state().is_authenticated() {
            println!("{}", ConsoleFormatter::format_login_prompt());
            println!();
        }
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /login    - Log in to the backend");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, cmd: &str, rl: &mut DefaultEditor) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /login           - Log in to the backend");
                println!("  /logout          - Log out and reset the session");
                println!("  /history         - Show the conversation so far");
                println!("  /clear           - Empty the conversation log");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/login" => {
                self.handle_login(rl).await;
                false
            }
            "/logout" => {
                self.session.logout();
                println!("Logged out.");
                false
            }
            "/history" => {
                println!();
                if self.session.conversation().is_empty() {
                    println!("(no messages yet)");
                }
                for message in self.session.conversation().messages() {
                    println!("{}", ConsoleFormatter::format_message(message));
                }
                println!();
                false
            }
            "/clear" => {
                self.session.clear_conversation();
                println!("Conversation cleared.");
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn handle_login(&mut self, rl: &mut DefaultEditor) {
        let username = match rl.readline("username: ") {
            Ok(line) => line.trim().to_string(),
            Err(_) => return,
        };
        // Read without echo; the password never enters any history
        let password = match read_password("password: ") {
            Ok(line) => line,
            Err(_) => return,
        };

        match self.session.login(&username, &password).await {
            Ok(()) => println!("Logged in as {}.", username),
            Err(e) => println!("{}", ConsoleFormatter::format_error(&e.to_string())),
        }
    }

    async fn process_message(&mut self, line: &str) {
        let spinner = if self.show_spinner {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner} thinking...")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            Some(bar)
        } else {
            None
        };

        let outcome = self.session.send(line).await;

        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }

        match outcome {
            SendOutcome::Replied => {
                if let Some(message) = self.session.conversation().last() {
                    println!("{}", ConsoleFormatter::format_message(message));
                }
            }
            SendOutcome::LoginRequired => {
                println!("{}", ConsoleFormatter::format_login_prompt());
            }
            SendOutcome::SessionExpired | SendOutcome::Failed => {
                if let Some(error) = self.session.state().last_error() {
                    println!("{}", ConsoleFormatter::format_error(error));
                }
                if self.session.state().wants_login() {
                    println!("{}", ConsoleFormatter::format_login_prompt());
                }
            }
            SendOutcome::Busy => {
                println!(
                    "{}",
                    ConsoleFormatter::format_error("a request is already in flight")
                );
            }
            SendOutcome::Ignored => {}
        }
    }
}

/// Where the history file lives: explicit override first, then the
/// platform data directory.
fn resolve_history_path(override_path: Option<&Path>) -> Option<PathBuf> {
    override_path
        .map(Path::to_path_buf)
        .or_else(|| dirs::data_dir().map(|p| p.join("sherpa-chat").join("history.txt")))
}

/// Helper that renders every typed character as an asterisk.
#[derive(Completer, Helper, Hinter, Validator)]
struct MaskedPrompt;

impl Highlighter for MaskedPrompt {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// Read a line without echoing it. Uses a throwaway editor, so the
/// input cannot end up in the chat history either.
fn read_password(prompt: &str) -> RlResult<String> {
    let mut rl: Editor<MaskedPrompt, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(MaskedPrompt));
    rl.readline(prompt)
}
