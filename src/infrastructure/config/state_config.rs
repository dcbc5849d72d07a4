use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// State carried between runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory the image picker was last left in.
    #[serde(default)]
    pub last_image_dir: Option<PathBuf>,
}
