use crate::domain::{ActorKind, FileRef, StepMetadata};
use crate::utils::clock_label;

pub const GREETING: &str = "Hey there! I'm Adam, your AI assistant. I'm here to help you navigate complex business intelligence and strategic decisions. Ready to see what we can accomplish together?";

/// A finalized chat message. Never mutated once pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub actor: ActorKind,
    pub content: String,
    /// Wall-clock label, e.g. "10:29 AM".
    pub timestamp: String,
    pub files: Vec<FileRef>,
    pub metadata: Option<StepMetadata>,
}

/// What a caller hands to the log. The log assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub actor: ActorKind,
    pub content: String,
    pub files: Vec<FileRef>,
    pub metadata: Option<StepMetadata>,
}

impl NewMessage {
    pub fn plain(actor: ActorKind, content: impl Into<String>) -> Self {
        Self {
            actor,
            content: content.into(),
            files: Vec::new(),
            metadata: None,
        }
    }
}

/// Append-only chat history for the session.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that opens with the assistant's greeting.
    pub fn with_greeting() -> Self {
        let mut log = Self::new();
        log.push(NewMessage::plain(ActorKind::AiMessage, GREETING));
        log
    }

    /// Appends a message and returns its id.
    pub fn push(&mut self, message: NewMessage) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.messages.push(Message {
            id,
            actor: message.actor,
            content: message.content,
            timestamp: clock_label(),
            files: message.files,
            metadata: message.metadata,
        });
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Messages pushed after the first `seen`. Used by the headless player.
    pub fn since(&self, seen: usize) -> &[Message] {
        self.messages.get(seen..).unwrap_or(&[])
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

    #[test]
    fn greeting_opens_the_log() {
        let log = MessageLog::with_greeting();
        assert_eq!(log.len(), 1);
        let first = &log.messages()[0];
        assert_eq!(first.actor, ActorKind::AiMessage);
        assert_eq!(first.content, GREETING);
        assert!(first.files.is_empty());
    }

    #[test]
    fn ids_increase_and_since_slices() {
        let mut log = MessageLog::new();
        let a = log.push(NewMessage::plain(ActorKind::UserMessage, "one"));
        let b = log.push(NewMessage::plain(ActorKind::AiMessage, "two"));
        assert!(b > a);
        assert_eq!(log.since(1).len(), 1);
        assert_eq!(log.since(1)[0].content, "two");
        assert!(log.since(5).is_empty());
        assert_eq!(log.last().map(|m| m.id), Some(b));
    }
}
