//! Response generation: one blocking completion per user turn.
//!
//! [`ResponseGenerator::generate`] never fails. Backend errors are folded
//! into [`GenerationOutcome::Fallback`] so the session always receives a
//! well-formed assistant message, while the error stays available for the
//! operator notice.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::ChatRequest;
use crate::core::message::Message;
use crate::core::prompt::build_request;

pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, I couldn't process your request at the moment. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("the completion service returned no content")]
    EmptyCompletion,
}

/// Seam between the generator and the hosted completion service.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submit the request and return the text of the single completion.
    async fn complete(&self, request: &ChatRequest) -> Result<String, GenerationError>;
}

#[derive(Debug)]
pub enum GenerationOutcome {
    Completed(String),
    Fallback {
        content: String,
        error: GenerationError,
    },
}

impl GenerationOutcome {
    pub fn content(&self) -> &str {
        match self {
            GenerationOutcome::Completed(content) => content,
            GenerationOutcome::Fallback { content, .. } => content,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            GenerationOutcome::Completed(_) => None,
            GenerationOutcome::Fallback { error, .. } => Some(error),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error().is_some()
    }

    pub fn into_message(self) -> Message {
        match self {
            GenerationOutcome::Completed(content) => Message::assistant(content),
            GenerationOutcome::Fallback { content, .. } => Message::assistant(content),
        }
    }
}

#[derive(Clone)]
pub struct ResponseGenerator {
    backend: Arc<dyn CompletionBackend>,
}

impl ResponseGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Produce the next assistant turn for `history`.
    ///
    /// The directive is prepended to a copy of the history; `history`
    /// itself is left untouched.
    pub async fn generate(&self, history: &[Message]) -> GenerationOutcome {
        let request = build_request(history);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "requesting completion"
        );

        let result = match self.backend.complete(&request).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Err(GenerationError::EmptyCompletion)
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(content) => GenerationOutcome::Completed(content),
            Err(error) => {
                warn!(%error, "completion failed, substituting fallback response");
                GenerationOutcome::Fallback {
                    content: FALLBACK_RESPONSE.to_string(),
                    error,
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedBackend;
    use super::*;
    use crate::core::prompt::{BACKEND_MODEL, SYSTEM_DIRECTIVE, TEMPERATURE};

    #[tokio::test]
    async fn success_is_trimmed() {
        let backend = ScriptedBackend::replying("  \n Hi there!\n\n");
        let generator = ResponseGenerator::new(backend.clone());

        let outcome = generator.generate(&[Message::user("Hello")]).await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.content(), "Hi there!");
    }

    #[tokio::test]
    async fn every_failure_kind_yields_the_fallback_verbatim() {
        let failures = vec![
            GenerationError::Transport("connection refused".into()),
            GenerationError::Api {
                status: 401,
                message: "Incorrect API key provided".into(),
            },
            GenerationError::Malformed("expected value at line 1".into()),
            GenerationError::EmptyCompletion,
        ];

        for failure in failures {
            let backend = ScriptedBackend::new(vec![Err(failure)]);
            let generator = ResponseGenerator::new(backend);
            let outcome = generator.generate(&[Message::user("Hello")]).await;
            assert!(outcome.is_fallback());
            assert_eq!(outcome.content(), FALLBACK_RESPONSE);
        }
    }

    #[tokio::test]
    async fn whitespace_only_completion_is_treated_as_failure() {
        let backend = ScriptedBackend::replying("   \n");
        let generator = ResponseGenerator::new(backend);

        let outcome = generator.generate(&[Message::user("Hello")]).await;
        assert!(matches!(
            outcome.error(),
            Some(GenerationError::EmptyCompletion)
        ));
        assert_eq!(outcome.into_message().content(), FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn request_carries_single_leading_directive_on_every_call() {
        let backend = ScriptedBackend::new(vec![
            Ok("first".into()),
            Ok("second".into()),
            Ok("third".into()),
        ]);
        let generator = ResponseGenerator::new(backend.clone());

        let mut history = vec![Message::user("Hello")];
        for _ in 0..3 {
            let reply = generator.generate(&history).await.into_message();
            history.push(reply);
            history.push(Message::user("And then?"));
        }

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        for request in requests.iter() {
            assert_eq!(request.model, BACKEND_MODEL);
            assert_eq!(request.temperature, TEMPERATURE);
            let systems: Vec<_> = request
                .messages
                .iter()
                .enumerate()
                .filter(|(_, m)| m.role == "system")
                .collect();
            assert_eq!(systems.len(), 1);
            assert_eq!(systems[0].0, 0);
            assert_eq!(systems[0].1.content, SYSTEM_DIRECTIVE);
        }
        assert_eq!(requests[2].messages.len(), 1 + 5);
    }

    #[tokio::test]
    async fn history_is_not_mutated() {
        let backend = ScriptedBackend::replying("ok");
        let generator = ResponseGenerator::new(backend);
        let history = vec![Message::user("Hello")];

        generator.generate(&history).await;
        assert_eq!(history, vec![Message::user("Hello")]);
    }
}
