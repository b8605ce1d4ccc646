//! Console formatting for messages, errors, and prompts

use colored::Colorize;
use sherpa_domain::{Message, Role};

/// Renders conversation output for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one message as `[HH:MM:SS] role  content`.
    pub fn format_message(message: &Message) -> String {
        let time = message
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S");

        let label = match message.role {
            Role::User => "you".cyan().bold(),
            Role::Assistant => "assistant".green().bold(),
        };

        format!("[{}] {}  {}", time, label, message.content)
    }

    pub fn format_error(error: &str) -> String {
        format!("{} {}", "error:".red().bold(), error)
    }

    /// Banner shown when a send is rejected for lack of a credential.
    pub fn format_login_prompt() -> String {
        format!(
            "{}",
            "Please log in to use the chat (type /login)".yellow()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_formatting_includes_content() {
        let message = Message::user("hello there");
        let rendered = ConsoleFormatter::format_message(&message);
        assert!(rendered.contains("hello there"));
        assert!(rendered.contains("you"));
    }

    #[test]
    fn test_assistant_label() {
        let message = Message::assistant("hi!");
        let rendered = ConsoleFormatter::format_message(&message);
        assert!(rendered.contains("assistant"));
    }

    #[test]
    fn test_error_formatting() {
        let rendered = ConsoleFormatter::format_error("connection refused");
        assert!(rendered.contains("connection refused"));
    }
}
