pub mod image_attachments;
pub mod image_encoder;
pub mod notification_manager;
pub mod preview_registry;

pub use image_attachments::ImageAttachments;
pub use notification_manager::NotificationManager;
pub use preview_registry::PreviewRegistry;
