use crate::ui::theme::Theme;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

#[derive(Clone, Debug)]
enum ListKind {
    Unordered,
    Ordered(u64),
}

struct LinkState {
    url: String,
    text: String,
}

/// Renders assistant replies into styled terminal lines.
///
/// Supports the subset models actually produce for installation guides:
/// headings, paragraphs, emphasis, nested lists, inline and fenced code,
/// block quotes, rules and links. Links render as `text <url>` since the
/// terminal cannot follow them.
struct MarkdownRenderer<'t> {
    theme: &'t Theme,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    list_stack: Vec<ListKind>,
    quote_depth: usize,
    code_block: Option<String>,
    link: Option<LinkState>,
}

impl<'t> MarkdownRenderer<'t> {
    fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            lines: Vec::new(),
            spans: Vec::new(),
            style_stack: vec![theme.assistant_text_style],
            list_stack: Vec::new(),
            quote_depth: 0,
            code_block: None,
            link: None,
        }
    }

    fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        let style = self.current_style().add_modifier(modifier);
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if let Some(link) = self.link.as_mut() {
            link.text.push_str(text);
        }
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn flush_line(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                self.theme.md_blockquote_style(),
            ));
        }
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            return;
        }
        if !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line();
                let style = self.theme.md_heading_style(level as u8);
                self.style_stack.push(style);
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
                let style = self.theme.md_blockquote_style();
                self.style_stack.push(style);
            }
            Tag::List(start) => {
                self.flush_line();
                self.list_stack.push(match start {
                    Some(n) => ListKind::Ordered(n),
                    None => ListKind::Unordered,
                });
            }
            Tag::Item => {
                self.flush_line();
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(ListKind::Ordered(next)) => {
                        let current = *next;
                        *next += 1;
                        format!("{indent}{current}. ")
                    }
                    Some(ListKind::Unordered) | None => format!("{indent}• "),
                };
                self.spans
                    .push(Span::styled(marker, self.theme.md_list_marker_style()));
            }
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.code_block = Some(String::new());
            }
            Tag::Emphasis => self.push_modifier(Modifier::ITALIC),
            Tag::Strong => self.push_modifier(Modifier::BOLD),
            Tag::Strikethrough => self.push_modifier(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } => {
                let style = self.theme.link_style;
                self.style_stack.push(style);
                self.link = Some(LinkState {
                    url: dest_url.to_string(),
                    text: String::new(),
                });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Heading(_) => {
                self.flush_line();
                self.pop_style();
                self.blank_line();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.pop_style();
                if self.quote_depth == 0 {
                    self.blank_line();
                }
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::CodeBlock => {
                let code = self.code_block.take().unwrap_or_default();
                let style = self.theme.md_codeblock_style();
                for code_line in code.trim_end_matches('\n').lines() {
                    self.lines
                        .push(Line::from(Span::styled(format!("  {code_line}"), style)));
                }
                self.blank_line();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(link) = self.link.take() {
                    if link.text.trim() != link.url {
                        self.spans.push(Span::styled(
                            format!(" <{}>", link.url),
                            self.theme.subtitle_style,
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(code) = self.code_block.as_mut() {
                    code.push_str(&text);
                } else {
                    let style = self.current_style();
                    self.push_text(&text, style);
                }
            }
            Event::Code(code) => {
                let style = self.theme.md_code_style();
                self.push_text(&code, style);
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = self.current_style();
                self.push_text(html.trim_end_matches('\n'), style);
            }
            Event::SoftBreak => {
                let style = self.current_style();
                self.push_text(" ", style);
            }
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(24),
                    self.theme.subtitle_style,
                )));
                self.blank_line();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

pub fn render_markdown(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let mut renderer = MarkdownRenderer::new(theme);
    for event in Parser::new_ext(content, options) {
        renderer.event(event);
    }
    renderer.finish()
}
