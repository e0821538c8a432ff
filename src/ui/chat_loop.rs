//! Main chat event loop
//!
//! Owns the terminal for the lifetime of the interactive session, maps key
//! presses onto [`App`] operations and redraws after every event. A
//! generation request is awaited inline, so the loop handles one user turn at
//! a time.

use crate::core::app::{App, TurnStart};
use crate::core::config::ConfigurationError;
use crate::core::generator::ResponseGenerator;
use crate::ui::renderer::{ui, INPUT_PLACEHOLDER};
use crate::ui::theme::Theme;
use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    style::Style,
    widgets::{Block, Borders},
    Terminal,
};
use std::{error::Error, io, time::Duration};
use tracing::{debug, info};
use tui_textarea::{Input as TAInput, TextArea};

const PAGE_SCROLL_LINES: u16 = 10;
const MOUSE_SCROLL_LINES: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    Newline,
    Reset,
    NextModel,
    PreviousModel,
    ClearSelection,
    ScrollUp(u16),
    ScrollDown(u16),
    Edit,
}

pub fn action_for_key(key: &KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => KeyAction::Quit,
        KeyCode::Char('l') | KeyCode::Char('L') if ctrl => KeyAction::Reset,
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
        {
            KeyAction::Newline
        }
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Tab => KeyAction::NextModel,
        KeyCode::BackTab => KeyAction::PreviousModel,
        KeyCode::Esc => KeyAction::ClearSelection,
        KeyCode::Up => KeyAction::ScrollUp(1),
        KeyCode::Down => KeyAction::ScrollDown(1),
        KeyCode::PageUp => KeyAction::ScrollUp(PAGE_SCROLL_LINES),
        KeyCode::PageDown => KeyAction::ScrollDown(PAGE_SCROLL_LINES),
        _ => KeyAction::Edit,
    }
}

pub fn new_input(theme: &Theme) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text(INPUT_PLACEHOLDER);
    input.set_style(theme.input_text_style);
    input.set_cursor_style(theme.input_cursor_style);
    input.set_cursor_line_style(Style::default());
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.input_border_style)
            .title("Message"),
    );
    input
}

pub async fn run_chat(
    generator: Result<ResponseGenerator, ConfigurationError>,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(generator);
    let theme = Theme::dark_default();
    let mut input = new_input(&theme);

    if let Some(err) = app.configuration_error() {
        info!(%err, "starting without credentials; generation disabled");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &mut input, &theme).await;

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    input: &mut TextArea<'static>,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app, input, theme))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match action_for_key(&key) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Submit => {
                    let text = input.lines().join("\n");
                    match app.begin_turn(&text) {
                        TurnStart::Pending(turn) => {
                            *input = new_input(theme);
                            // Show the user turn and the thinking indicator
                            // before blocking on the request.
                            terminal.draw(|f| ui(f, app, input, theme))?;
                            let outcome = turn.resolve().await;
                            debug!(fallback = outcome.is_fallback(), "turn resolved");
                            app.complete_turn(outcome);
                        }
                        TurnStart::Reset | TurnStart::Ignored => *input = new_input(theme),
                        // Keep the draft so it can be sent once credentials exist.
                        TurnStart::Blocked => {}
                    }
                }
                KeyAction::Newline => input.insert_newline(),
                KeyAction::Reset => app.reset(),
                KeyAction::NextModel => app.select_next_model(),
                KeyAction::PreviousModel => app.select_previous_model(),
                KeyAction::ClearSelection => app.clear_model_selection(),
                KeyAction::ScrollUp(lines) => app.scroll_up(lines),
                KeyAction::ScrollDown(lines) => app.scroll_down(lines),
                KeyAction::Edit => {
                    input.input(TAInput::from(key));
                }
            },
            Event::Paste(text) => {
                input.insert_str(text);
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_up(MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollDown => app.scroll_down(MOUSE_SCROLL_LINES),
                _ => {}
            },
            _ => {}
        }
    }
}
