//! Reviews submitted during this run.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::{Platform, ReviewForm};

/// A review the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedReview {
    pub review_id: Option<String>,
    pub platform: Option<Platform>,
    pub product_name: String,
    pub review_title: String,
    pub image_count: usize,
    pub submitted_at: DateTime<Local>,
}

impl SubmittedReview {
    #[must_use]
    pub fn from_form(form: &ReviewForm, image_count: usize, review_id: Option<String>) -> Self {
        Self {
            review_id,
            platform: form.platform(),
            product_name: form.product_name.clone(),
            review_title: form.review_title.clone(),
            image_count,
            submitted_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewListAction {
    None,
    NewReview,
    Back,
}

pub struct ReviewListScreen {
    reviews: Vec<SubmittedReview>,
    state: ListState,
}

impl ReviewListScreen {
    /// Shows `reviews` newest first.
    #[must_use]
    pub fn new(mut reviews: Vec<SubmittedReview>) -> Self {
        reviews.reverse();
        let mut state = ListState::default();
        if !reviews.is_empty() {
            state.select(Some(0));
        }
        Self { reviews, state }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ReviewListAction {
        match key.code {
            KeyCode::Char('n' | 'a') => ReviewListAction::NewReview,
            KeyCode::Esc | KeyCode::Char('q') => ReviewListAction::Back,
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_previous();
                ReviewListAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.selected().is_some_and(|i| i + 1 < self.reviews.len()) {
                    self.state.select_next();
                }
                ReviewListAction::None
            }
            _ => ReviewListAction::None,
        }
    }

    fn item(review: &SubmittedReview) -> ListItem<'_> {
        let platform = review
            .platform
            .map_or("-", Platform::display_name);
        let id = review.review_id.as_deref().unwrap_or("pending id");
        ListItem::new(vec![
            Line::from(vec![
                Span::styled(
                    review.review_title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  #{id}"), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::styled(
                format!(
                    "  {platform} · {} · {} image(s) · {}",
                    review.product_name,
                    review.image_count,
                    review.submitted_at.format("%Y-%m-%d %H:%M")
                ),
                Style::default().fg(Color::Gray),
            )),
        ])
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Reviews ({}) ", self.reviews.len()));

        if self.reviews.is_empty() {
            Paragraph::new(Span::styled(
                "No reviews submitted yet.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block)
            .render(body, buf);
        } else {
            let items: Vec<ListItem> = self.reviews.iter().map(Self::item).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("> ");
            StatefulWidget::render(list, body, buf, &mut self.state);
        }

        Paragraph::new(Span::styled(
            "n: New review | Esc: Back | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        ))
        .render(footer, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ReviewField;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn review(title: &str) -> SubmittedReview {
        let form = ReviewForm::new()
            .with(ReviewField::Platform, "gmarket")
            .with(ReviewField::ProductName, "Lamp")
            .with(ReviewField::ReviewTitle, title);
        SubmittedReview::from_form(&form, 2, Some("r1".to_string()))
    }

    #[test]
    fn test_from_form() {
        let review = review("Bright");
        assert_eq!(review.platform, Some(Platform::Gmarket));
        assert_eq!(review.product_name, "Lamp");
        assert_eq!(review.image_count, 2);
    }

    #[test]
    fn test_newest_first() {
        let screen = ReviewListScreen::new(vec![review("first"), review("second")]);
        assert_eq!(screen.reviews[0].review_title, "second");
        assert_eq!(screen.len(), 2);
    }

    #[test]
    fn test_keys() {
        let mut screen = ReviewListScreen::new(vec![review("only")]);
        assert_eq!(screen.handle_key(key(KeyCode::Char('n'))), ReviewListAction::NewReview);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), ReviewListAction::Back);

        screen.handle_key(key(KeyCode::Down));
        assert_eq!(screen.state.selected(), Some(0));
    }

    #[test]
    fn test_empty_list_renders_hint() {
        let mut screen = ReviewListScreen::new(Vec::new());
        assert!(screen.is_empty());
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);

        screen.render(area, &mut buf);

        let row: String = (0..40).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("No reviews submitted yet."));
    }
}
