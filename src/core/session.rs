//! In-memory conversation history for one interactive process.
//!
//! The session lives exactly as long as the [`App`](crate::core::app::App)
//! that owns it. Nothing is written to disk.

use crate::core::message::{Message, Role};

#[derive(Debug, Default, Clone)]
pub struct Session {
    messages: Vec<Message>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn to the end of the conversation.
    ///
    /// User turns with blank content are rejected and leave the session
    /// untouched; returns whether the message was stored.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> bool {
        let content = content.into();
        if role.is_user() && content.trim().is_empty() {
            return false;
        }
        self.messages.push(Message::new(role, content));
        true
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Owned copy of the conversation. Later appends or resets are not
    /// visible through the returned vector.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
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
