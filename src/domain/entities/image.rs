//! Selected image entities.

use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Revocable handle to a locally generated image preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewRef(Uuid);

impl PreviewRef {
    /// Creates a fresh, unique reference.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PreviewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

/// Metadata captured when a preview is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    /// File name shown in the image strip.
    pub file_name: String,
    /// File size in bytes, if readable.
    pub size_bytes: Option<u64>,
    /// Pixel dimensions, if the header could be decoded.
    pub dimensions: Option<(u32, u32)>,
}

impl PreviewInfo {
    /// Returns a compact one-line description.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![self.file_name.clone()];
        if let Some((w, h)) = self.dimensions {
            parts.push(format!("{w}x{h}"));
        }
        if let Some(size) = self.size_bytes {
            parts.push(format_size(size));
        }
        parts.join(" · ")
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// A file picked for upload together with its preview reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    path: PathBuf,
    preview: PreviewRef,
}

impl ImageEntry {
    /// Creates new entry.
    #[must_use]
    pub const fn new(path: PathBuf, preview: PreviewRef) -> Self {
        Self { path, preview }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the preview reference.
    #[must_use]
    pub const fn preview(&self) -> PreviewRef {
        self.preview
    }

    /// Returns the file name for display.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().to_string())
    }
}
