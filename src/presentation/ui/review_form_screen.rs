//! Add-review form screen.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracing::debug;

use crate::application::services::{ImageAttachments, PreviewRegistry};
use crate::domain::entities::{PreviewInfo, ReviewField, ReviewForm};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{
    ContentEditor, FileExplorerAction, FileExplorerComponent, ImageStrip, InputKind,
    PlatformSelect, TextInput,
};

/// Focusable parts of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(ReviewField),
    Images,
    Submit,
    Cancel,
}

impl FormFocus {
    const ORDER: [Self; 12] = [
        Self::Field(ReviewField::Platform),
        Self::Field(ReviewField::ProductName),
        Self::Field(ReviewField::OptionName),
        Self::Field(ReviewField::Price),
        Self::Field(ReviewField::ShippingFee),
        Self::Field(ReviewField::Seller),
        Self::Field(ReviewField::StartDate),
        Self::Field(ReviewField::ReviewTitle),
        Self::Field(ReviewField::ReviewContent),
        Self::Images,
        Self::Submit,
        Self::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// What the app should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFormAction {
    None,
    Submit,
    Cancel,
}

/// Session state shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Checking,
    SignedIn(String),
    SignedOut,
}

/// Form values and images captured when a submission starts.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub form: ReviewForm,
    pub images: Vec<PathBuf>,
}

/// Image picker defaults.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    pub start_dir: PathBuf,
    pub show_hidden: bool,
}

pub struct ReviewFormScreen {
    platform: PlatformSelect,
    inputs: Vec<(ReviewField, TextInput)>,
    content: ContentEditor,
    images: ImageAttachments,
    image_cursor: usize,
    focus: FormFocus,
    loading: bool,
    session: SessionStatus,
    explorer: Option<FileExplorerComponent>,
    picker: PickerOptions,
}

fn input_kind(field: ReviewField) -> InputKind {
    match field {
        ReviewField::Price | ReviewField::ShippingFee => InputKind::Number,
        ReviewField::StartDate => InputKind::Date,
        _ => InputKind::Text,
    }
}

impl ReviewFormScreen {
    #[must_use]
    pub fn new(previews: Arc<PreviewRegistry>, picker: PickerOptions) -> Self {
        let inputs = ReviewField::ALL
            .into_iter()
            .filter(|f| !matches!(f, ReviewField::Platform | ReviewField::ReviewContent))
            .map(|field| {
                let input = TextInput::new(field.label())
                    .kind(input_kind(field))
                    .required(field.is_required())
                    .placeholder(field.placeholder());
                (field, input)
            })
            .collect();

        let content_field = ReviewField::ReviewContent;
        let mut screen = Self {
            platform: PlatformSelect::new(),
            inputs,
            content: ContentEditor::new(content_field.label(), content_field.placeholder()),
            images: ImageAttachments::new(previews),
            image_cursor: 0,
            focus: FormFocus::Field(ReviewField::Platform),
            loading: false,
            session: SessionStatus::Checking,
            explorer: None,
            picker,
        };
        screen.apply_focus();
        screen
    }

    #[must_use]
    pub const fn focus(&self) -> FormFocus {
        self.focus
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_picker_open(&self) -> bool {
        self.explorer.is_some()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Directory the picker was last confirmed in.
    #[must_use]
    pub fn picker_dir(&self) -> &Path {
        &self.picker.start_dir
    }

    pub fn set_session(&mut self, session: SessionStatus) {
        self.session = session;
    }

    /// Current form values.
    #[must_use]
    pub fn form(&self) -> ReviewForm {
        let mut form = ReviewForm::new();
        if let Some(platform) = self.platform.selected() {
            form.set(ReviewField::Platform, platform.as_str());
        }
        for (field, input) in &self.inputs {
            form.set(*field, input.value());
        }
        form.set(ReviewField::ReviewContent, self.content.value());
        form
    }

    /// Adds picked files to the image list.
    pub fn select_images(&mut self, paths: Vec<PathBuf>) -> usize {
        if let Some(dir) = paths.first().and_then(|p| p.parent()) {
            self.picker.start_dir = dir.to_path_buf();
        }
        self.images.add_files(paths)
    }

    /// Removes the image at `index`. Out-of-range indices are ignored.
    pub fn remove_image(&mut self, index: usize) -> bool {
        let removed = self.images.remove(index).is_some();
        if self.image_cursor >= self.images.len() {
            self.image_cursor = self.images.len().saturating_sub(1);
        }
        removed
    }

    /// Enters the loading state and captures the draft. Returns `None` while
    /// a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ReviewDraft> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(ReviewDraft {
            form: self.form(),
            images: self.images.paths(),
        })
    }

    pub fn finish_submit(&mut self) {
        self.loading = false;
    }

    pub fn open_picker(&mut self) {
        debug!(dir = %self.picker.start_dir.display(), "Opening image picker");
        self.explorer = Some(FileExplorerComponent::new(
            self.picker.start_dir.clone(),
            self.picker.show_hidden,
        ));
    }

    fn set_focus(&mut self, focus: FormFocus) {
        self.focus = focus;
        self.apply_focus();
    }

    fn apply_focus(&mut self) {
        let focus = self.focus;
        self.platform
            .set_focused(focus == FormFocus::Field(ReviewField::Platform));
        for (field, input) in &mut self.inputs {
            input.set_focused(focus == FormFocus::Field(*field));
        }
        self.content
            .set_focused(focus == FormFocus::Field(ReviewField::ReviewContent));
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        let FormFocus::Field(field) = self.focus else {
            return None;
        };
        self.inputs
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, input)| input)
    }

    fn request_submit(&self) -> ReviewFormAction {
        if self.loading {
            debug!("Submit ignored while loading");
            ReviewFormAction::None
        } else {
            ReviewFormAction::Submit
        }
    }

    fn request_cancel(&self) -> ReviewFormAction {
        if self.loading {
            ReviewFormAction::None
        } else {
            ReviewFormAction::Cancel
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> ReviewFormAction {
        let Some(explorer) = self.explorer.as_mut() else {
            return ReviewFormAction::None;
        };
        match explorer.handle_key(key) {
            FileExplorerAction::SelectFiles(paths) => {
                self.explorer = None;
                let added = self.select_images(paths);
                self.image_cursor = self.images.len().saturating_sub(added.max(1));
                self.set_focus(FormFocus::Images);
            }
            FileExplorerAction::Close => self.explorer = None,
            FileExplorerAction::None => {}
        }
        ReviewFormAction::None
    }

    fn handle_images_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.image_cursor = self.image_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.image_cursor + 1 < self.images.len() {
                    self.image_cursor += 1;
                }
            }
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => {
                self.remove_image(self.image_cursor);
            }
            KeyCode::Enter | KeyCode::Char('a') => self.open_picker(),
            _ => {}
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> ReviewFormAction {
        if self.explorer.is_some() {
            return self.handle_picker_key(key);
        }

        if EventHandler::is_submit_event(&key) {
            return self.request_submit();
        }
        if EventHandler::is_back_event(&key) {
            return self.request_cancel();
        }
        if EventHandler::is_picker_event(&key) {
            self.open_picker();
            return ReviewFormAction::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return ReviewFormAction::None;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.previous());
                return ReviewFormAction::None;
            }
            _ => {}
        }

        match self.focus {
            FormFocus::Field(ReviewField::Platform) => match key.code {
                KeyCode::Right | KeyCode::Char(' ' | 'l') => self.platform.next(),
                KeyCode::Left | KeyCode::Char('h') => self.platform.previous(),
                KeyCode::Enter | KeyCode::Down => self.set_focus(self.focus.next()),
                _ => {}
            },
            FormFocus::Field(ReviewField::ReviewContent) => {
                self.content.handle_key(key);
            }
            FormFocus::Field(_) => self.handle_input_key(key),
            FormFocus::Images => self.handle_images_key(key),
            FormFocus::Submit => {
                if key.code == KeyCode::Enter {
                    return self.request_submit();
                }
            }
            FormFocus::Cancel => {
                if key.code == KeyCode::Enter {
                    return self.request_cancel();
                }
            }
        }

        ReviewFormAction::None
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Down) {
            self.set_focus(self.focus.next());
            return;
        }
        if key.code == KeyCode::Up {
            self.set_focus(self.focus.previous());
            return;
        }
        let Some(input) = self.focused_input() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => {
                input.input_char(c);
            }
            KeyCode::Backspace => {
                input.backspace();
            }
            KeyCode::Delete => {
                input.delete();
            }
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            _ => {}
        }
    }

    fn input(&self, field: ReviewField) -> Option<&TextInput> {
        self.inputs
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, input)| input)
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let session = match &self.session {
            SessionStatus::Checking => {
                Span::styled("checking session...", Style::default().fg(Color::DarkGray))
            }
            SessionStatus::SignedIn(name) => {
                Span::styled(format!("signed in as {name}"), Style::default().fg(Color::Green))
            }
            SessionStatus::SignedOut => {
                Span::styled("not signed in", Style::default().fg(Color::Yellow))
            }
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                " Add Review ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            session,
        ]))
        .render(area, buf);
    }

    fn render_buttons(&self, area: Rect, buf: &mut Buffer) {
        let button = |label: &str, focused: bool, enabled: bool| {
            let style = match (enabled, focused) {
                (false, _) => Style::default().fg(Color::DarkGray),
                (true, true) => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::White),
            };
            Span::styled(format!("[ {label} ]"), style)
        };

        let submit_label = if self.loading { "Submitting..." } else { "Submit" };
        Paragraph::new(Line::from(vec![
            button(submit_label, self.focus == FormFocus::Submit, !self.loading),
            Span::raw("  "),
            button("Cancel", self.focus == FormFocus::Cancel, !self.loading),
        ]))
        .render(area, buf);
    }

    fn render_footer(area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(Span::styled(
            "Tab/Shift+Tab: Move | Ctrl+S: Submit | Ctrl+O: Add images | Esc: Cancel | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )))
        .render(area, buf);
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let [
            header,
            platform,
            row1,
            row2,
            row3,
            title,
            content,
            images,
            buttons,
            footer,
        ] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(header, buf);
        (&self.platform).render(platform, buf);

        let pairs = [
            (row1, ReviewField::ProductName, ReviewField::OptionName),
            (row2, ReviewField::Price, ReviewField::ShippingFee),
            (row3, ReviewField::Seller, ReviewField::StartDate),
        ];
        for (row, left, right) in pairs {
            let [l, r] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(row);
            if let Some(input) = self.input(left) {
                input.render(l, buf);
            }
            if let Some(input) = self.input(right) {
                input.render(r, buf);
            }
        }
        if let Some(input) = self.input(ReviewField::ReviewTitle) {
            input.render(title, buf);
        }
        (&self.content).render(content, buf);

        let previews: Vec<PreviewInfo> = (0..self.images.len())
            .filter_map(|i| self.images.preview_info(i))
            .collect();
        ImageStrip::new(&previews)
            .selected(Some(self.image_cursor))
            .focused(self.focus == FormFocus::Images)
            .render(images, buf);

        self.render_buttons(buttons, buf);
        Self::render_footer(footer, buf);

        if let Some(explorer) = self.explorer.as_mut() {
            let [_, middle, _] = Layout::vertical([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .areas(area);
            let [_, popup, _] = Layout::horizontal([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .areas(middle);
            explorer.render(popup, buf);
        }
    }
}
