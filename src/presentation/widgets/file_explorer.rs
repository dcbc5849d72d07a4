use crossterm::event::{KeyCode, KeyEvent};
use image::ImageFormat;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileExplorerAction {
    /// Chosen files, in the order they were marked.
    SelectFiles(Vec<PathBuf>),
    Close,
    None,
}

#[derive(Debug, Clone)]
struct FileEntry {
    path: PathBuf,
    is_dir: bool,
    name: String,
}

/// Image picker overlay. Lists directories and image files only.
pub struct FileExplorerComponent {
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    state: ListState,
    show_hidden: bool,
    marked: Vec<PathBuf>,
}

fn is_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

impl FileExplorerComponent {
    pub fn new(start_dir: impl Into<PathBuf>, show_hidden: bool) -> Self {
        let root = start_dir.into();
        let mut component = Self {
            current_dir: root.clone(),
            entries: Vec::new(),
            state: ListState::default(),
            show_hidden,
            marked: Vec::new(),
        };
        component.load_entries(&root);
        component
    }

    #[must_use]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[must_use]
    pub fn marked(&self) -> &[PathBuf] {
        &self.marked
    }

    pub fn load_entries(&mut self, path: &Path) {
        let selected_name = self.selected_entry().map(|e| e.name.clone());

        self.entries.clear();

        if let Some(parent) = path.parent() {
            self.entries.push(FileEntry {
                path: parent.to_path_buf(),
                is_dir: true,
                name: "..".to_string(),
            });
        }

        if let Ok(read_dir) = fs::read_dir(path) {
            let mut entries: Vec<FileEntry> = read_dir
                .filter_map(Result::ok)
                .filter(|entry| {
                    if self.show_hidden {
                        return true;
                    }
                    !entry
                        .path()
                        .file_name()
                        .is_some_and(|s| s.to_string_lossy().starts_with('.'))
                })
                .map(|entry| {
                    let path = entry.path();
                    let is_dir = path.is_dir();
                    let name = path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string();
                    FileEntry { path, is_dir, name }
                })
                .filter(|entry| entry.is_dir || is_image(&entry.path))
                .collect();

            entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.name.cmp(&b.name),
            });

            self.entries.extend(entries);
        }

        if let Some(name) = selected_name {
            if let Some(idx) = self.entries.iter().position(|e| e.name == name) {
                self.state.select(Some(idx));
            } else {
                self.state.select(Some(0));
            }
        } else if self.entries.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        let path = self.current_dir.clone();
        self.load_entries(&path);
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        let path = self.current_dir.clone();
        self.load_entries(&path);
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.current_dir.parent().map(PathBuf::from) {
            self.change_dir(parent);
        }
    }

    fn toggle_mark(&mut self) {
        let Some(selected) = self.selected_entry() else {
            return;
        };
        if selected.is_dir {
            return;
        }
        let path = selected.path.clone();
        if let Some(pos) = self.marked.iter().position(|p| *p == path) {
            self.marked.remove(pos);
        } else {
            self.marked.push(path);
        }
        self.next();
    }

    /// Enters the highlighted directory, or confirms the selection. With no
    /// marked files the highlighted file is chosen on its own.
    fn activate(&mut self) -> FileExplorerAction {
        let Some(selected) = self.selected_entry().cloned() else {
            return FileExplorerAction::None;
        };
        if selected.name == ".." {
            self.go_up();
            FileExplorerAction::None
        } else if selected.is_dir {
            self.change_dir(selected.path);
            FileExplorerAction::None
        } else if self.marked.is_empty() {
            FileExplorerAction::SelectFiles(vec![selected.path])
        } else {
            FileExplorerAction::SelectFiles(std::mem::take(&mut self.marked))
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FileExplorerAction {
        match key.code {
            KeyCode::Esc => FileExplorerAction::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                FileExplorerAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                FileExplorerAction::None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.go_up();
                FileExplorerAction::None
            }
            KeyCode::Char(' ') => {
                self.toggle_mark();
                FileExplorerAction::None
            }
            KeyCode::Char('.') => {
                self.toggle_hidden();
                FileExplorerAction::None
            }
            KeyCode::Right | KeyCode::Char('l') => match self.selected_entry() {
                Some(entry) if entry.is_dir && entry.name != ".." => {
                    let path = entry.path.clone();
                    self.change_dir(path);
                    FileExplorerAction::None
                }
                _ => FileExplorerAction::None,
            },
            KeyCode::Enter => self.activate(),
            _ => FileExplorerAction::None,
        }
    }

    fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.entries.len().saturating_sub(1) {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.entries.len().saturating_sub(1)
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_entry(&self) -> Option<&FileEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = format!(
            " Select Images{} - {} ",
            if self.show_hidden { " (H)" } else { "" },
            self.current_dir.display()
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner_area = block.inner(area);

        let layout =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner_area);
        let list_area = layout[0];
        let footer_area = layout[1];

        block.render(area, buf);

        let marked: BTreeSet<&Path> = self.marked.iter().map(PathBuf::as_path).collect();
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let mark = if marked.contains(entry.path.as_path()) {
                    "[x] "
                } else if entry.is_dir {
                    "    "
                } else {
                    "[ ] "
                };
                let suffix = if entry.is_dir && entry.name != ".." { "/" } else { "" };
                ListItem::new(format!("{mark}{}{suffix}", entry.name)).style(
                    Style::default().fg(if entry.is_dir {
                        Color::Blue
                    } else {
                        Color::White
                    }),
                )
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        StatefulWidget::render(list, list_area, buf, &mut self.state);

        let footer = Line::from(vec![
            Span::raw(" [Esc] Cancel | [Space] Mark | "),
            Span::raw(format!("[Enter] Open/Add ({} marked) ", self.marked.len())),
        ])
        .style(Style::default().fg(Color::Gray));

        Widget::render(footer, footer_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn names(explorer: &FileExplorerComponent) -> Vec<String> {
        explorer.entries.iter().map(|e| e.name.clone()).collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("album")).unwrap();
        fs::write(dir.path().join("b.png"), b"png").unwrap();
        fs::write(dir.path().join("a.JPG"), b"jpg").unwrap();
        fs::write(dir.path().join("notes.txt"), b"txt").unwrap();
        fs::write(dir.path().join(".hidden.png"), b"png").unwrap();
        dir
    }

    #[test]
    fn test_lists_directories_then_images_only() {
        let dir = fixture();
        let explorer = FileExplorerComponent::new(dir.path(), false);

        assert_eq!(names(&explorer), vec!["..", "album", "a.JPG", "b.png"]);
    }

    #[test]
    fn test_toggle_hidden_shows_dotfiles() {
        let dir = fixture();
        let mut explorer = FileExplorerComponent::new(dir.path(), false);

        explorer.handle_key(key(KeyCode::Char('.')));

        assert!(names(&explorer).contains(&".hidden.png".to_string()));
    }

    #[test]
    fn test_enter_on_file_selects_it() {
        let dir = fixture();
        let mut explorer = FileExplorerComponent::new(dir.path(), false);
        explorer.state.select(Some(2));

        let action = explorer.handle_key(key(KeyCode::Enter));

        assert_eq!(
            action,
            FileExplorerAction::SelectFiles(vec![dir.path().join("a.JPG")])
        );
    }

    #[test]
    fn test_marked_files_are_returned_in_mark_order() {
        let dir = fixture();
        let mut explorer = FileExplorerComponent::new(dir.path(), false);
        explorer.state.select(Some(3));
        explorer.handle_key(key(KeyCode::Char(' ')));
        explorer.state.select(Some(2));
        explorer.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(explorer.marked().len(), 2);

        let action = explorer.handle_key(key(KeyCode::Enter));

        assert_eq!(
            action,
            FileExplorerAction::SelectFiles(vec![
                dir.path().join("b.png"),
                dir.path().join("a.JPG"),
            ])
        );
        assert!(explorer.marked().is_empty());
    }

    #[test]
    fn test_marking_twice_unmarks() {
        let dir = fixture();
        let mut explorer = FileExplorerComponent::new(dir.path(), false);
        explorer.state.select(Some(2));
        explorer.handle_key(key(KeyCode::Char(' ')));
        explorer.state.select(Some(2));
        explorer.handle_key(key(KeyCode::Char(' ')));

        assert!(explorer.marked().is_empty());
    }

    #[test]
    fn test_enter_on_directory_descends() {
        let dir = fixture();
        let mut explorer = FileExplorerComponent::new(dir.path(), false);
        explorer.state.select(Some(1));

        assert_eq!(
            explorer.handle_key(key(KeyCode::Enter)),
            FileExplorerAction::None
        );
        assert_eq!(explorer.current_dir(), dir.path().join("album"));
        assert_eq!(names(&explorer), vec![".."]);
    }

    #[test]
    fn test_escape_closes() {
        let dir = fixture();
        let mut explorer = FileExplorerComponent::new(dir.path(), false);

        assert_eq!(
            explorer.handle_key(key(KeyCode::Esc)),
            FileExplorerAction::Close
        );
    }
}
