//! Domain error types.

mod auth_error;
mod review_error;

pub use auth_error::AuthError;
pub use review_error::{DEFAULT_FAILURE_MESSAGE, DEFAULT_REJECTION_MESSAGE, ReviewError};
