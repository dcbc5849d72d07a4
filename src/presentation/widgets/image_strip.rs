//! Selected image list shown under the form fields.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::entities::PreviewInfo;

pub struct ImageStrip<'a> {
    previews: &'a [PreviewInfo],
    selected: Option<usize>,
    focused: bool,
}

impl<'a> ImageStrip<'a> {
    #[must_use]
    pub const fn new(previews: &'a [PreviewInfo]) -> Self {
        Self {
            previews,
            selected: None,
            focused: false,
        }
    }

    #[must_use]
    pub const fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for ImageStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Images ({}) ", self.previews.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.previews.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No images. Press Enter or Ctrl+O to add.",
                Style::default().fg(Color::DarkGray),
            )))
            .render(inner, buf);
            return;
        }

        let height = usize::from(inner.height).max(1);
        let selected = self.selected.unwrap_or(0);
        let top = selected.saturating_sub(height - 1);

        let lines: Vec<Line> = self
            .previews
            .iter()
            .enumerate()
            .skip(top)
            .take(height)
            .map(|(i, info)| {
                let is_selected = self.focused && self.selected == Some(i);
                let marker = if is_selected { "> " } else { "  " };
                let style = if is_selected {
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{}. {}", i + 1, info.summary()), style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
