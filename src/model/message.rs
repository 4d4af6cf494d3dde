//! Conversation log and message types.
//!
//! The conversation is an append-only log: messages are pushed in the order
//! operations settle and are never reordered or removed. It is seeded with a
//! single assistant greeting, so it is never empty, and it lives only as long
//! as the process - there is no durable chat history by design.

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Text the operator typed (or triggered via a quick action).
    User,
    /// Text from Classi: a server reply or the fixed fallback.
    Assistant,
}

/// A single turn in the conversation.
///
/// Content is opaque text. It may contain newlines and is rendered
/// preformatted; no transformation is applied on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author of this turn.
    pub role: Role,
    /// Literal message text, verbatim from the user or the server.
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Greeting shown as the first message of every fresh conversation.
pub const GREETING_TEXT: &str = "Hi! I'm Classi, your Bahamas Customs helpdesk assistant. \
Ask me about HS codes, duty rates, customs forms, or ports of entry.";

/// Fixed assistant reply substituted when a chat request fails.
///
/// Matches the backend's own degraded-mode wording so the user always gets a
/// human contact channel, whatever went wrong.
pub const FALLBACK_TEXT: &str = "I'm having trouble processing your request. \
For immediate assistance, please contact Bahamas Customs at +1 (242) 325-6550 \
or email customsinfo@bahamas.gov.bs.";

/// Append-only, insertion-ordered conversation log.
///
/// # Invariants
///
/// - Never empty: seeded with the assistant greeting on construction.
/// - Append-only: there is no API to remove or reorder messages.
/// - Display order equals insertion order.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING_TEXT)],
        }
    }

    /// All messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the log is seeded and append-only.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message.
    pub fn last(&self) -> &Message {
        // Safe by the never-empty invariant.
        self.messages
            .last()
            .unwrap_or_else(|| unreachable!("conversation is seeded and append-only"))
    }

    /// Append a user message with the literal given text.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message with the literal given text.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
