//! Registry of live image previews.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::entities::{PreviewInfo, PreviewRef};

/// Issues preview references and tracks which ones are still live.
///
/// A reference is live from `create` until its single `revoke`.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: Mutex<HashMap<PreviewRef, PreviewInfo>>,
}

impl PreviewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a preview for a file and returns its reference.
    ///
    /// Unreadable files still get a reference; only the metadata is missing.
    pub fn create(&self, path: &Path) -> PreviewRef {
        let preview = PreviewRef::generate();
        let info = read_preview_info(path);
        debug!(preview = %preview, file = %info.file_name, "Preview created");
        self.live.lock().insert(preview, info);
        preview
    }

    /// Returns metadata for a live preview.
    #[must_use]
    pub fn get(&self, preview: PreviewRef) -> Option<PreviewInfo> {
        self.live.lock().get(&preview).cloned()
    }

    /// Releases a preview. Returns `false` if it was not live.
    pub fn revoke(&self, preview: PreviewRef) -> bool {
        let removed = self.live.lock().remove(&preview).is_some();
        if removed {
            debug!(preview = %preview, "Preview revoked");
        } else {
            warn!(preview = %preview, "Preview revoked twice or never created");
        }
        removed
    }

    #[must_use]
    pub fn is_live(&self, preview: PreviewRef) -> bool {
        self.live.lock().contains_key(&preview)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }
}

fn read_preview_info(path: &Path) -> PreviewInfo {
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
    let size_bytes = std::fs::metadata(path).ok().map(|m| m.len());
    let dimensions = image::image_dimensions(path).ok();

    PreviewInfo {
        file_name,
        size_bytes,
        dimensions,
    }
}
