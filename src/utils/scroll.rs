//! Transcript wrapping for scroll calculations.
//!
//! The transcript is wrapped here and rendered without ratatui's own
//! wrapping, so the row count used for scroll limits is exactly what ends up
//! on screen.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Builds the visual rows of one logical line.
struct RowBuilder {
    width: usize,
    rows: Vec<Line<'static>>,
    row: Vec<Span<'static>>,
    row_width: usize,
    word: Vec<(char, Style)>,
    word_width: usize,
}

impl RowBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
            row: Vec::new(),
            row_width: 0,
            word: Vec::new(),
            word_width: 0,
        }
    }

    fn append(&mut self, ch: char, style: Style) {
        match self.row.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push(ch),
            _ => self.row.push(Span::styled(ch.to_string(), style)),
        }
        self.row_width += ch.width().unwrap_or(0);
    }

    fn break_row(&mut self) {
        self.rows.push(Line::from(std::mem::take(&mut self.row)));
        self.row_width = 0;
    }

    fn push(&mut self, ch: char, style: Style) {
        if ch == ' ' {
            self.flush_word();
            // A space that does not fit ends the row and is dropped.
            if self.row_width < self.width {
                self.append(' ', style);
            } else {
                self.break_row();
            }
        } else {
            self.word.push((ch, style));
            self.word_width += ch.width().unwrap_or(0);
        }
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        if self.row_width > 0 && self.row_width + self.word_width > self.width {
            self.break_row();
        }
        // Words longer than a row are split wherever the row fills up.
        for (ch, style) in std::mem::take(&mut self.word) {
            let ch_width = ch.width().unwrap_or(0);
            if self.row_width > 0 && self.row_width + ch_width > self.width {
                self.break_row();
            }
            self.append(ch, style);
        }
        self.word_width = 0;
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_word();
        if !self.row.is_empty() || self.rows.is_empty() {
            self.break_row();
        }
        self.rows
    }
}

/// Word-wrap `lines` to `width` columns, keeping span styles. Words wider
/// than a row are broken across rows. A zero width returns the lines as is.
pub fn prewrap_lines(lines: &[Line<'_>], width: u16) -> Vec<Line<'static>> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if width == 0 {
            out.push(Line::from(
                line.spans
                    .iter()
                    .map(|span| Span::styled(span.content.to_string(), span.style))
                    .collect::<Vec<_>>(),
            ));
            continue;
        }
        let mut builder = RowBuilder::new(usize::from(width));
        for span in &line.spans {
            let style = line.style.patch(span.style);
            for ch in span.content.chars() {
                builder.push(ch, style);
            }
        }
        out.extend(builder.finish());
    }
    out
}

/// Rows the lines occupy once word-wrapped to `width` columns.
pub fn wrapped_line_count(lines: &[Line<'_>], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    u16::try_from(prewrap_lines(lines, width).len()).unwrap_or(u16::MAX)
}
