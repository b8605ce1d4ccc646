//! Append-only conversation store

use super::entities::Message;

/// Ordered log of exchanged messages (Entity)
///
/// The store owns its messages exclusively. Entries are appended at the
/// end and never reordered, edited, or individually removed; `clear`
/// empties the whole log on session reset.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end of the log. Never fails.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Empty the log (logout / session reset).
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::Role;

    #[test]
    fn test_append_preserves_order() {
        let mut log = Conversation::new();
        log.append(Message::user("first"));
        log.append(Message::assistant("second"));
        log.append(Message::user("third"));

        let contents: Vec<&str> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_last_returns_newest_entry() {
        let mut log = Conversation::new();
        assert!(log.last().is_none());

        log.append(Message::user("hi"));
        log.append(Message::assistant("hello!"));

        let last = log.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "hello!");
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = Conversation::new();
        log.append(Message::user("hi"));
        assert_eq!(log.len(), 1);

        log.clear();
        assert!(log.is_empty());
    }
}
