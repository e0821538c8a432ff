use crate::core::notice::NoticeKind;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Header
    pub title_style: Style,
    pub subtitle_style: Style,

    // Transcript
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub thinking_style: Style,

    // Sidebar
    pub sidebar_border_style: Style,
    pub sidebar_heading_style: Style,
    pub sidebar_selected_style: Style,
    pub link_style: Style,

    // Banner
    pub notice_blocking_style: Style,
    pub notice_error_style: Style,
    pub notice_info_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::Gray),

            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            thinking_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            sidebar_border_style: Style::default().fg(Color::DarkGray),
            sidebar_heading_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            sidebar_selected_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
            link_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            notice_blocking_style: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            notice_error_style: Style::default().fg(Color::LightRed),
            notice_info_style: Style::default().fg(Color::Green),

            input_border_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn notice_style(&self, kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Blocking => self.notice_blocking_style,
            NoticeKind::Error => self.notice_error_style,
            NoticeKind::Info => self.notice_info_style,
        }
    }

    pub fn md_heading_style(&self, level: u8) -> Style {
        let base = self.assistant_text_style.add_modifier(Modifier::BOLD);
        match level {
            1 => base.fg(Color::LightCyan).add_modifier(Modifier::UNDERLINED),
            2 => base.fg(Color::LightCyan),
            _ => base,
        }
    }

    pub fn md_code_style(&self) -> Style {
        Style::default().fg(Color::LightYellow)
    }

    pub fn md_codeblock_style(&self) -> Style {
        Style::default().fg(Color::LightYellow).bg(Color::Rgb(30, 30, 30))
    }

    pub fn md_list_marker_style(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn md_blockquote_style(&self) -> Style {
        self.assistant_text_style
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }
}
