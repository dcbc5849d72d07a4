//! Multi-line editor for the review body.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthStr;

/// Multi-line text area. Editing goes through `tui_textarea`, drawing is
/// done here so the widget follows the rest of the form.
pub struct ContentEditor {
    textarea: TextArea<'static>,
    focused: bool,
    label: String,
    placeholder: String,
}

impl ContentEditor {
    #[must_use]
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            textarea: TextArea::default(),
            focused: false,
            label: label.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns the text with lines joined by `\n`.
    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// True when no line holds any character.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(String::is_empty)
    }

    /// Handles an editing key. Returns whether it was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let word = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.textarea.insert_char(c);
            }
            KeyCode::Enter => self.textarea.insert_newline(),
            KeyCode::Backspace if word => {
                self.textarea.delete_word();
            }
            KeyCode::Backspace => {
                self.textarea.delete_char();
            }
            KeyCode::Delete => {
                self.textarea.delete_next_char();
            }
            KeyCode::Left if word => self.textarea.move_cursor(CursorMove::WordBack),
            KeyCode::Left => self.textarea.move_cursor(CursorMove::Back),
            KeyCode::Right if word => self.textarea.move_cursor(CursorMove::WordForward),
            KeyCode::Right => self.textarea.move_cursor(CursorMove::Forward),
            KeyCode::Up => self.textarea.move_cursor(CursorMove::Up),
            KeyCode::Down => self.textarea.move_cursor(CursorMove::Down),
            KeyCode::Home => self.textarea.move_cursor(CursorMove::Head),
            KeyCode::End => self.textarea.move_cursor(CursorMove::End),
            _ => return false,
        }
        true
    }
}

impl Widget for &ContentEditor {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(vec![
                Span::raw(format!(" {}", self.label)),
                Span::styled(" *", Style::default().fg(Color::Red)),
                Span::raw(" "),
            ]));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
        }

        let (row, col) = self.textarea.cursor();
        let height = usize::from(inner.height);
        let top = row.saturating_sub(height - 1);

        if !self.is_empty() {
            let lines: Vec<Line> = self
                .textarea
                .lines()
                .iter()
                .skip(top)
                .take(height)
                .map(|l| Line::raw(l.as_str()))
                .collect();
            Paragraph::new(lines)
                .style(Style::default().fg(Color::White))
                .render(inner, buf);
        }

        if self.focused {
            let prefix: String = self
                .textarea
                .lines()
                .get(row)
                .map(|l| l.chars().take(col).collect())
                .unwrap_or_default();
            let x = prefix.width().min(usize::from(inner.width) - 1);
            let cursor_x = inner.x + u16::try_from(x).unwrap_or(0);
            let cursor_y = inner.y + u16::try_from(row - top).unwrap_or(0);
            if cursor_y < inner.y + inner.height {
                buf[(cursor_x, cursor_y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(editor: &mut ContentEditor, text: &str) {
        for c in text.chars() {
            editor.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_multiline_value() {
        let mut editor = ContentEditor::new("Content", "");
        type_str(&mut editor, "Solid build.");
        editor.handle_key(key(KeyCode::Enter));
        type_str(&mut editor, "Fast delivery.");

        assert_eq!(editor.value(), "Solid build.\nFast delivery.");
    }

    #[test]
    fn test_blank_lines_count_as_empty() {
        let mut editor = ContentEditor::new("Content", "");
        assert!(editor.is_empty());

        editor.handle_key(key(KeyCode::Enter));
        assert!(editor.is_empty());

        type_str(&mut editor, " ");
        assert!(!editor.is_empty());
    }

    #[test]
    fn test_control_chars_are_not_consumed() {
        let mut editor = ContentEditor::new("Content", "");
        let consumed = editor.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert!(!consumed);
        assert!(editor.is_empty());
    }
}
