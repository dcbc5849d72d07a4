//! Review submission error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::ReviewField;

/// Default message when the server rejects a review without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to submit the review.";

/// Default message when submission fails for any other reason.
pub const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred while submitting the review.";

/// Review submission error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ReviewError {
    #[error("required fields missing: {}", format_fields(.fields))]
    MissingFields { fields: Vec<ReviewField> },

    #[error("invalid review date: {value}")]
    InvalidDate { value: String },

    #[error("login required to submit a review")]
    LoginRequired,

    #[error("failed to encode {}: {message}", .path.display())]
    ImageEncoding { path: PathBuf, message: String },

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

fn format_fields(fields: &[ReviewField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ReviewError {
    /// Creates missing fields error.
    #[must_use]
    pub fn missing_fields(fields: Vec<ReviewField>) -> Self {
        Self::MissingFields { fields }
    }

    /// Creates rejection error, falling back to the default message.
    #[must_use]
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
        Self::Rejected { status, message }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates image encoding error.
    #[must_use]
    pub fn image_encoding(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ImageEncoding {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the error was caught before any network call.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields { .. } | Self::InvalidDate { .. } | Self::LoginRequired
        )
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
