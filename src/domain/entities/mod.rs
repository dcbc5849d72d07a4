//! Domain entities.

mod image;
mod review;
mod session;
mod token;

pub use image::{ImageEntry, PreviewInfo, PreviewRef};
pub use review::{Platform, ReviewField, ReviewForm, START_DATE_FORMAT};
pub use session::{Session, UserId};
pub use token::AccessToken;
