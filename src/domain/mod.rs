//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notification model.
pub mod notification;
/// Port definitions.
pub mod ports;

pub use entities::{AccessToken, ImageEntry, PreviewRef, ReviewField, ReviewForm, Session, UserId};
pub use errors::{AuthError, ReviewError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{ReviewPort, SessionPort, TokenStoragePort};
