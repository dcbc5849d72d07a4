//! Inline `data:` URL encoding for selected images.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};
use futures_util::future::try_join_all;
use image::ImageFormat;
use tracing::debug;

use crate::domain::errors::ReviewError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Picks the MIME type from the content, then the extension.
#[must_use]
pub fn detect_mime(bytes: &[u8], path: &Path) -> &'static str {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map_or(FALLBACK_MIME, |format| format.to_mime_type())
}

/// Builds a `data:<mime>;base64,<payload>` URL.
#[must_use]
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}

/// Reads one file and encodes it as a data URL.
///
/// # Errors
/// Returns error if the file cannot be read.
pub async fn encode_data_url(path: &Path) -> Result<String, ReviewError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ReviewError::image_encoding(path, e.to_string()))?;
    let mime = detect_mime(&bytes, path);
    debug!(file = %path.display(), mime, size = bytes.len(), "Image encoded");
    Ok(to_data_url(&bytes, mime))
}

/// Encodes every file concurrently and keeps the input order.
///
/// # Errors
/// Fails with the first file that cannot be read.
pub async fn encode_all(paths: &[PathBuf]) -> Result<Vec<String>, ReviewError> {
    try_join_all(paths.iter().map(|path| encode_data_url(path))).await
}
