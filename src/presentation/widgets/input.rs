//! Single-line text input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Which characters an input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    /// Digits and a single decimal point.
    Number,
    /// Digits and `-`, as in `2024-05-01`.
    Date,
}

impl InputKind {
    fn accepts(self, current: &str, c: char) -> bool {
        match self {
            Self::Text => !c.is_control(),
            Self::Number => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
            Self::Date => c.is_ascii_digit() || c == '-',
        }
    }
}

/// Text input field widget.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars, not bytes.
    cursor: usize,
    focused: bool,
    required: bool,
    kind: InputKind,
    placeholder: String,
    label: String,
}

impl TextInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            required: false,
            kind: InputKind::Text,
            placeholder: String::new(),
            label: label.into(),
        }
    }

    /// Restricts accepted characters.
    #[must_use]
    pub const fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the field as required in its title.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Inserts character at cursor. Returns whether the value changed.
    pub fn input_char(&mut self, c: char) -> bool {
        if !self.kind.accepts(&self.value, c) {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Moves cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Moves cursor to start.
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    fn title(&self) -> Line<'_> {
        let mut spans = vec![Span::raw(format!(" {}", self.label))];
        if self.required {
            spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }

    fn cursor_offset(&self) -> usize {
        self.value
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.value.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
        } else {
            // Keep the cursor visible by scrolling the text horizontally.
            let width = usize::from(inner.width);
            let offset = self.cursor_offset();
            let skip = offset.saturating_sub(width.saturating_sub(1));
            let mut skipped = 0;
            let visible: String = self
                .value
                .chars()
                .skip_while(|c| {
                    if skipped < skip {
                        skipped += c.width().unwrap_or(0);
                        true
                    } else {
                        false
                    }
                })
                .collect();
            Paragraph::new(visible)
                .style(Style::default().fg(Color::White))
                .render(inner, buf);
        }

        if self.focused && inner.width > 0 {
            let width = usize::from(inner.width);
            let offset = self.cursor_offset().min(width.saturating_sub(1));
            let cursor_x = inner.x + u16::try_from(offset).unwrap_or(0);
            if cursor_x < inner.x + inner.width && inner.height > 0 {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}
