use crate::core::app::App;
use crate::core::catalog::ModelCatalog;
use crate::core::prompt::BACKEND_MODEL;
use crate::ui::markdown::render_markdown;
use crate::ui::theme::Theme;
use crate::utils::scroll::prewrap_lines;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;
use unicode_width::UnicodeWidthStr;

pub const APP_TITLE: &str = "Ollama Installation Assistant";
pub const APP_SUBTITLE: &str = "Your guide to installing Ollama and exploring models";
pub const INPUT_PLACEHOLDER: &str = "How can I assist you today?";

const INPUT_MAX_LINES: u16 = 5;
const SIDEBAR_MIN_WIDTH: u16 = 28;
const SIDEBAR_MAX_WIDTH: u16 = 44;
const DESCRIPTION_MIN_HEIGHT: u16 = 3;
const KEY_HINTS: &str =
    "Enter send · Alt+Enter newline · Tab models · Ctrl+L reset · Ctrl+C quit";

/// Transcript lines for the whole session, plus the thinking indicator while
/// a request is in flight.
pub fn build_transcript_lines(app: &App, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if app.session().is_empty() && !app.pending {
        lines.push(Line::from(Span::styled(
            "Ask how to install Ollama on your platform, or pick a model in the sidebar to learn about it.",
            theme.thinking_style,
        )));
        return lines;
    }

    for msg in app.session().messages() {
        if msg.is_user() {
            for (i, content_line) in msg.content().lines().enumerate() {
                let prefix = if i == 0 { "You: " } else { "     " };
                lines.push(Line::from(vec![
                    Span::styled(prefix, theme.user_prefix_style),
                    Span::styled(content_line.to_string(), theme.user_text_style),
                ]));
            }
        } else if msg.is_assistant() {
            lines.extend(render_markdown(msg.content(), theme));
        } else {
            continue;
        }
        lines.push(Line::from(""));
    }

    if app.pending {
        lines.push(Line::from(Span::styled("Thinking…", theme.thinking_style)));
    }

    lines
}

fn sidebar_width(catalog: &ModelCatalog) -> u16 {
    let widest = catalog
        .links()
        .iter()
        .map(|link| link.url.width())
        .chain(catalog.entries().iter().map(|m| m.display_name().width() + 2))
        .max()
        .unwrap_or(0);
    // borders plus one column of padding
    let wanted = u16::try_from(widest + 3).unwrap_or(SIDEBAR_MAX_WIDTH);
    wanted.clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH)
}

pub fn input_height(input: &TextArea<'_>) -> u16 {
    let lines = u16::try_from(input.lines().len()).unwrap_or(INPUT_MAX_LINES);
    lines.clamp(1, INPUT_MAX_LINES) + 2
}

pub fn ui(f: &mut Frame, app: &mut App, input: &TextArea<'_>, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(input_height(input)),
        ])
        .split(f.area());

    render_header(f, rows[0], theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(sidebar_width(app.catalog())),
        ])
        .split(rows[1]);

    render_transcript(f, body[0], app, theme);
    render_sidebar(f, body[1], app, theme);
    render_banner(f, rows[2], app, theme);

    f.render_widget(input, rows[3]);
}

fn render_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(APP_TITLE, theme.title_style)),
        Line::from(vec![
            Span::styled(APP_SUBTITLE, theme.subtitle_style),
            Span::styled(
                format!(" · answers from {BACKEND_MODEL}"),
                theme.thinking_style,
            ),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.sidebar_border_style),
    );
    f.render_widget(header, area);
}

fn render_transcript(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    // one column reserved for the gap before the sidebar
    let text_width = area.width.saturating_sub(1);
    let lines = prewrap_lines(&build_transcript_lines(app, theme), text_width);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(area.height);

    app.max_scroll_offset = max_offset;
    app.scroll_offset = if app.auto_scroll {
        max_offset
    } else {
        app.scroll_offset.min(max_offset)
    };

    let transcript = Paragraph::new(lines).scroll((app.scroll_offset, 0));
    let text_area = Rect {
        width: text_width,
        ..area
    };
    f.render_widget(transcript, text_area);
}

/// Heights of the model list, description and links panels. The list keeps
/// its full height first and the links panel is dropped when it would leave
/// the description less than its minimum.
fn sidebar_heights(catalog: &ModelCatalog, available: u16) -> [u16; 3] {
    let models_wanted = u16::try_from(catalog.len()).unwrap_or(u16::MAX) + 2;
    let links_wanted = u16::try_from(catalog.links().len() * 2).unwrap_or(u16::MAX) + 2;

    let models = models_wanted.min(available);
    let rest = available - models;
    let links = if rest >= links_wanted + DESCRIPTION_MIN_HEIGHT {
        links_wanted
    } else {
        0
    };
    [models, rest - links, links]
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let catalog = app.catalog();
    let [models_height, description_height, links_height] = sidebar_heights(catalog, area.height);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(models_height),
            Constraint::Length(description_height),
            Constraint::Length(links_height),
        ])
        .split(area);

    let items: Vec<ListItem> = catalog
        .entries()
        .iter()
        .map(|entry| ListItem::new(entry.display_name()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.sidebar_border_style)
                .title(Span::styled(
                    "Available Models (info only)",
                    theme.sidebar_heading_style,
                )),
        )
        .highlight_style(theme.sidebar_selected_style)
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(app.selected_model_index());
    f.render_stateful_widget(list, sections[0], &mut state);

    let description = match app.selected_model() {
        Some(entry) => vec![
            Line::from(Span::styled(
                entry.display_name(),
                theme.sidebar_heading_style,
            )),
            Line::from(Span::styled(entry.description, theme.assistant_text_style)),
        ],
        None => vec![Line::from(Span::styled(
            "Select a model with Tab to learn more.",
            theme.thinking_style,
        ))],
    };
    let description = Paragraph::new(description)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.sidebar_border_style),
        );
    f.render_widget(description, sections[1]);

    if links_height == 0 {
        return;
    }

    let links: Vec<Line> = catalog
        .links()
        .iter()
        .flat_map(|link| {
            [
                Line::from(Span::styled(link.label, theme.assistant_text_style)),
                Line::from(Span::styled(link.url, theme.link_style)),
            ]
        })
        .collect();
    let links = Paragraph::new(links).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.sidebar_border_style)
            .title(Span::styled("Resources", theme.sidebar_heading_style)),
    );
    f.render_widget(links, sections[2]);
}

fn render_banner(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = match app.latest_notice() {
        Some(notice) => Line::from(Span::styled(
            notice.text.clone(),
            theme.notice_style(notice.kind),
        )),
        None => Line::from(Span::styled(KEY_HINTS, theme.subtitle_style)),
    };
    f.render_widget(Paragraph::new(line), area);
}
