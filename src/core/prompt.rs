//! System directive and outbound request assembly.

use crate::api::{ChatMessage, ChatRequest};
use crate::core::message::{Message, Role};

/// Backend model every completion is dispatched to. The sidebar catalog
/// does not influence this.
pub const BACKEND_MODEL: &str = "gpt-4o";

pub const TEMPERATURE: f32 = 0.7;

pub const SYSTEM_DIRECTIVE: &str = "You are an AI assistant specializing in guiding users through the installation of Ollama on various operating systems. \
Provide clear, step-by-step instructions tailored to the user's platform and the specific model they are interested in. \
Ensure your instructions are concise, actionable, and easy to follow. \
Here are useful resources: [Ollama Setup](https://ollama.com/download), \
[GitHub](https://github.com/ollama/ollama), [Models Page](https://ollama.com/library).";

/// Build the message list sent to the completion service.
///
/// The result always holds exactly one system entry, in first position. A
/// conversation that already opens with a system message keeps it as the
/// directive; otherwise [`SYSTEM_DIRECTIVE`] is prepended. System entries
/// further down the history are dropped.
pub fn build_api_messages(history: &[Message]) -> Vec<ChatMessage> {
    let (directive, rest) = match history.split_first() {
        Some((first, rest)) if first.is_system() => (first.content(), rest),
        _ => (SYSTEM_DIRECTIVE, history),
    };

    let mut api_messages = Vec::with_capacity(rest.len() + 1);
    api_messages.push(ChatMessage {
        role: Role::System.as_str().to_string(),
        content: directive.to_string(),
    });
    api_messages.extend(rest.iter().filter(|m| !m.is_system()).map(ChatMessage::from));
    api_messages
}

pub fn build_request(history: &[Message]) -> ChatRequest {
    ChatRequest {
        model: BACKEND_MODEL.to_string(),
        messages: build_api_messages(history),
        temperature: TEMPERATURE,
    }
}
