//! Images selected for the review being edited.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::preview_registry::PreviewRegistry;
use crate::domain::entities::{ImageEntry, PreviewInfo};

/// Ordered list of selected images. Owns one preview per entry and revokes
/// it when the entry is removed or the list is dropped.
#[derive(Debug)]
pub struct ImageAttachments {
    entries: Vec<ImageEntry>,
    previews: Arc<PreviewRegistry>,
}

impl ImageAttachments {
    #[must_use]
    pub const fn new(previews: Arc<PreviewRegistry>) -> Self {
        Self {
            entries: Vec::new(),
            previews,
        }
    }

    /// Appends files after the existing entries. Returns how many were added.
    pub fn add_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        let before = self.entries.len();
        for path in paths {
            let preview = self.previews.create(&path);
            self.entries.push(ImageEntry::new(path, preview));
        }
        let added = self.entries.len() - before;
        debug!(added, total = self.entries.len(), "Images selected");
        added
    }

    /// Removes the entry at `index` and revokes its preview.
    pub fn remove(&mut self, index: usize) -> Option<ImageEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.previews.revoke(entry.preview());
        debug!(index, remaining = self.entries.len(), "Image removed");
        Some(entry)
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File paths in selection order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path().to_path_buf()).collect()
    }

    #[must_use]
    pub fn preview_info(&self, index: usize) -> Option<PreviewInfo> {
        self.entries
            .get(index)
            .and_then(|entry| self.previews.get(entry.preview()))
    }
}

impl Drop for ImageAttachments {
    fn drop(&mut self) {
        for entry in self.entries.drain(..) {
            self.previews.revoke(entry.preview());
        }
    }
}
