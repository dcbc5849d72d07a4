//! Platform selector.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::entities::Platform;

/// Cycles through the fixed platform list. Starts unset.
#[derive(Debug, Clone, Default)]
pub struct PlatformSelect {
    selected: Option<Platform>,
    focused: bool,
}

impl PlatformSelect {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn selected(&self) -> Option<Platform> {
        self.selected
    }

    pub fn select(&mut self, platform: Option<Platform>) {
        self.selected = platform;
    }

    /// Moves to the next platform, wrapping back to unset after the last one.
    pub fn next(&mut self) {
        self.selected = match self.selected {
            None => Platform::ALL.first().copied(),
            Some(current) => Platform::ALL
                .iter()
                .position(|p| *p == current)
                .and_then(|i| Platform::ALL.get(i + 1))
                .copied(),
        };
    }

    /// Moves to the previous platform, wrapping from unset to the last one.
    pub fn previous(&mut self) {
        self.selected = match self.selected {
            None => Platform::ALL.last().copied(),
            Some(current) => Platform::ALL
                .iter()
                .position(|p| *p == current)
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| Platform::ALL.get(i))
                .copied(),
        };
    }
}

impl Widget for &PlatformSelect {
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
                Span::raw(" Platform"),
                Span::styled(" *", Style::default().fg(Color::Red)),
                Span::raw(" "),
            ]));

        let mut spans = Vec::with_capacity(Platform::ALL.len() * 2);
        for platform in Platform::ALL {
            let style = if self.selected == Some(platform) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", platform.display_name()), style));
            spans.push(Span::raw(" "));
        }
        if self.selected.is_none() {
            spans.push(Span::styled(
                "(none, ←/→ to choose)",
                Style::default().fg(Color::DarkGray),
            ));
        }

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        assert!(PlatformSelect::new().selected().is_none());
    }

    #[test]
    fn test_next_cycles_through_all_and_back_to_unset() {
        let mut select = PlatformSelect::new();
        let mut seen = Vec::new();
        for _ in 0..Platform::ALL.len() {
            select.next();
            seen.push(select.selected().unwrap());
        }
        assert_eq!(seen, Platform::ALL.to_vec());

        select.next();
        assert!(select.selected().is_none());
    }

    #[test]
    fn test_previous_from_unset_picks_last() {
        let mut select = PlatformSelect::new();
        select.previous();
        assert_eq!(select.selected(), Platform::ALL.last().copied());

        select.select(Some(Platform::ALL[0]));
        select.previous();
        assert!(select.selected().is_none());
    }
}
