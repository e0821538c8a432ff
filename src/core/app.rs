//! Interactive state owned by the event loop.
//!
//! [`App`] ties the session store, the response generator and the operator
//! notices together. UI handlers receive it by `&mut` reference; there is no
//! global state.

use crate::core::catalog::{ModelCatalog, ModelEntry};
use crate::core::config::ConfigurationError;
use crate::core::generator::{GenerationOutcome, ResponseGenerator};
use crate::core::message::{Message, Role};
use crate::core::notice::{Notice, NoticeKind};
use crate::core::session::Session;

pub const RESET_COMMAND: &str = "/reset";

/// A user turn that has been appended and now waits on the completion
/// service. Resolving it does not borrow the [`App`], so the caller can keep
/// drawing while the request is in flight.
pub struct PendingTurn {
    generator: ResponseGenerator,
    snapshot: Vec<Message>,
}

impl PendingTurn {
    pub fn snapshot(&self) -> &[Message] {
        &self.snapshot
    }

    pub async fn resolve(self) -> GenerationOutcome {
        self.generator.generate(&self.snapshot).await
    }
}

pub enum TurnStart {
    /// Blank input; nothing happened.
    Ignored,
    /// The input was the reset command.
    Reset,
    /// Credentials are missing so generation is disabled.
    Blocked,
    Pending(PendingTurn),
}

pub struct App {
    session: Session,
    generator: Result<ResponseGenerator, ConfigurationError>,
    notices: Vec<Notice>,
    catalog: ModelCatalog,
    selected_model: Option<usize>,
    pub pending: bool,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    /// Largest transcript scroll offset at the last draw.
    pub max_scroll_offset: u16,
}

impl App {
    /// Build the app around a generator, or around the configuration error
    /// that prevented one from being built. The error is recorded as the
    /// single blocking notice.
    pub fn new(generator: Result<ResponseGenerator, ConfigurationError>) -> Self {
        let mut notices = Vec::new();
        if let Err(err) = &generator {
            notices.push(Notice::blocking(err.to_string()));
        }
        Self {
            session: Session::new(),
            generator,
            notices,
            catalog: ModelCatalog,
            selected_model: None,
            pending: false,
            scroll_offset: 0,
            auto_scroll: true,
            max_scroll_offset: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn configuration_error(&self) -> Option<&ConfigurationError> {
        self.generator.as_ref().err()
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_ok()
    }

    /// Handle one line of user input up to the point where the completion
    /// service has to be called.
    /// The user turn is stored as typed; trimming only decides whether the
    /// input is blank or the reset command.
    pub fn begin_turn(&mut self, input: &str) -> TurnStart {
        let command = input.trim();
        if command.is_empty() {
            return TurnStart::Ignored;
        }
        if command == RESET_COMMAND {
            self.reset();
            return TurnStart::Reset;
        }

        let generator = match &self.generator {
            Ok(generator) => generator.clone(),
            Err(_) => return TurnStart::Blocked,
        };

        if !self.session.append(Role::User, input) {
            return TurnStart::Ignored;
        }
        self.clear_transient_notices();
        self.pending = true;
        self.auto_scroll = true;

        TurnStart::Pending(PendingTurn {
            generator,
            snapshot: self.session.snapshot(),
        })
    }

    /// Record the generator's answer as the assistant turn.
    pub fn complete_turn(&mut self, outcome: GenerationOutcome) -> Message {
        self.pending = false;
        if let Some(error) = outcome.error() {
            self.notices
                .push(Notice::error(format!("Error generating response: {error}")));
        }
        let reply = outcome.into_message();
        self.session.append(reply.role(), reply.content());
        self.auto_scroll = true;
        reply
    }

    /// Run a full turn: append the user input, call the generator and append
    /// its answer. Returns the assistant message, if a turn took place.
    pub async fn submit(&mut self, input: &str) -> Option<Message> {
        match self.begin_turn(input) {
            TurnStart::Pending(turn) => {
                let outcome = turn.resolve().await;
                Some(self.complete_turn(outcome))
            }
            TurnStart::Ignored | TurnStart::Reset | TurnStart::Blocked => None,
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.clear_transient_notices();
        self.notices.push(Notice::info("Chat reset."));
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    fn clear_transient_notices(&mut self) {
        self.notices.retain(|notice| notice.kind == NoticeKind::Blocking);
    }

    pub fn selected_model(&self) -> Option<&'static ModelEntry> {
        self.selected_model.and_then(|index| self.catalog.get(index))
    }

    pub fn selected_model_index(&self) -> Option<usize> {
        self.selected_model
    }

    pub fn select_next_model(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        self.selected_model = Some(match self.selected_model {
            Some(index) => (index + 1) % len,
            None => 0,
        });
    }

    pub fn select_previous_model(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        self.selected_model = Some(match self.selected_model {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        });
    }

    pub fn clear_model_selection(&mut self) {
        self.selected_model = None;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(lines)
            .min(self.max_scroll_offset);
        if self.scroll_offset >= self.max_scroll_offset {
            self.auto_scroll = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::test_support::ScriptedBackend;
    use crate::core::generator::{GenerationError, FALLBACK_RESPONSE};
    use crate::core::config::API_KEY_VAR;

    fn app_with(backend: std::sync::Arc<ScriptedBackend>) -> App {
        App::new(Ok(ResponseGenerator::new(backend)))
    }

    fn unconfigured_app() -> App {
        App::new(Err(ConfigurationError::MissingApiKey { var: API_KEY_VAR }))
    }

    #[tokio::test]
    async fn hello_round_trip_appends_both_turns() {
        let backend = ScriptedBackend::replying("Hi there!");
        let mut app = app_with(backend.clone());

        let reply = app.submit("Hello").await.expect("a turn took place");
        assert_eq!(reply.content(), "Hi there!");

        let snapshot = app.session().snapshot();
        assert_eq!(
            snapshot,
            vec![Message::user("Hello"), Message::assistant("Hi there!")]
        );
        assert_eq!(backend.call_count(), 1);
        assert!(app.notices().is_empty());
        assert!(!app.pending);
    }

    #[tokio::test]
    async fn reset_after_three_messages_empties_the_session() {
        let backend = ScriptedBackend::new(vec![Ok("one".into()), Ok("two".into())]);
        let mut app = app_with(backend);
        app.submit("first").await;
        app.submit("second").await;
        assert_eq!(app.session().len(), 4);

        app.reset();
        assert_eq!(app.session().snapshot().len(), 0);
        app.reset();
        assert!(app.session().is_empty());
    }

    #[test]
    fn reset_command_is_not_sent_to_the_model() {
        let backend = ScriptedBackend::replying("unused");
        let mut app = app_with(backend.clone());
        app.session.append(Role::User, "a");
        app.session.append(Role::Assistant, "b");
        app.session.append(Role::User, "c");

        assert!(matches!(app.begin_turn("  /reset "), TurnStart::Reset));
        assert!(app.session().is_empty());
        assert_eq!(backend.call_count(), 0);
        assert_eq!(
            app.latest_notice().map(|n| n.kind),
            Some(NoticeKind::Info)
        );
    }

    #[tokio::test]
    async fn failure_appends_fallback_and_records_one_error_notice() {
        let backend = ScriptedBackend::new(vec![Err(GenerationError::Api {
            status: 500,
            message: "boom".into(),
        })]);
        let mut app = app_with(backend);

        let reply = app.submit("Hello").await.expect("turn");
        assert_eq!(reply.content(), FALLBACK_RESPONSE);
        assert_eq!(app.session().len(), 2);
        assert!(app.session().messages()[1].is_assistant());

        let errors: Vec<_> = app
            .notices()
            .iter()
            .filter(|n| n.kind == NoticeKind::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].text.starts_with("Error generating response:"));
        assert!(errors[0].text.contains("boom"));
    }

    #[tokio::test]
    async fn session_stays_usable_after_a_failure() {
        let backend = ScriptedBackend::new(vec![
            Err(GenerationError::Transport("offline".into())),
            Ok("Back online".into()),
        ]);
        let mut app = app_with(backend);

        app.submit("first").await;
        let reply = app.submit("second").await.expect("turn");
        assert_eq!(reply.content(), "Back online");
        assert_eq!(app.session().len(), 4);
        assert!(app.notices().is_empty(), "new turn clears the old error");
    }

    #[tokio::test]
    async fn missing_credentials_block_generation_and_surface_once() {
        let mut app = unconfigured_app();
        assert!(!app.is_configured());

        for _ in 0..3 {
            assert!(matches!(app.begin_turn("Hello"), TurnStart::Blocked));
            assert!(app.submit("Hello").await.is_none());
        }

        assert!(app.session().is_empty());
        let blocking: Vec<_> = app.notices().iter().filter(|n| n.is_blocking()).collect();
        assert_eq!(blocking.len(), 1);
        assert!(blocking[0].text.contains(API_KEY_VAR));

        app.reset();
        assert_eq!(app.notices().iter().filter(|n| n.is_blocking()).count(), 1);
    }

    #[test]
    fn blank_input_is_ignored() {
        let backend = ScriptedBackend::replying("unused");
        let mut app = app_with(backend);
        assert!(matches!(app.begin_turn("   "), TurnStart::Ignored));
        assert!(app.session().is_empty());
        assert!(!app.pending);
    }

    #[test]
    fn begin_turn_snapshot_includes_the_input_as_typed() {
        let backend = ScriptedBackend::replying("unused");
        let mut app = app_with(backend);
        match app.begin_turn("  Install on Windows?  ") {
            TurnStart::Pending(turn) => {
                assert_eq!(turn.snapshot(), &[Message::user("  Install on Windows?  ")]);
            }
            _ => panic!("expected a pending turn"),
        }
        assert!(app.pending);
    }

    #[test]
    fn model_selection_wraps_in_both_directions() {
        let mut app = unconfigured_app();
        assert!(app.selected_model().is_none());

        app.select_next_model();
        assert_eq!(app.selected_model().map(|m| m.id), Some("codellama"));

        app.select_previous_model();
        assert_eq!(app.selected_model().map(|m| m.id), Some("wizardcoder"));

        app.select_next_model();
        assert_eq!(app.selected_model_index(), Some(0));

        app.clear_model_selection();
        assert!(app.selected_model().is_none());
    }

    #[test]
    fn scrolling_toggles_auto_scroll() {
        let mut app = unconfigured_app();
        app.scroll_offset = 10;
        app.scroll_up(3);
        assert_eq!(app.scroll_offset, 7);
        assert!(!app.auto_scroll);

        app.max_scroll_offset = 12;
        app.scroll_down(100);
        assert_eq!(app.scroll_offset, 12);
        assert!(app.auto_scroll);
    }
}
