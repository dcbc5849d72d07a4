mod content_editor;
mod file_explorer;
mod image_strip;
mod input;
mod platform_select;

pub use content_editor::ContentEditor;
pub use file_explorer::{FileExplorerAction, FileExplorerComponent};
pub use image_strip::ImageStrip;
pub use input::{InputKind, TextInput};
pub use platform_select::PlatformSelect;
