//! Session lookup and token storage errors.

use thiserror::Error;

/// Failures while finding a token or asking the auth provider about it.
///
/// A token the provider does not recognise is not an error: the lookup
/// reports "no session" instead.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("failed to read token from keyring: {message}")]
    TokenRetrievalFailed { message: String },

    #[error("failed to save token to keyring: {message}")]
    TokenStorageFailed { message: String },

    #[error("network error during session lookup: {message}")]
    NetworkError { message: String },

    #[error("auth provider answered with status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("auth provider sent an unreadable user: {message}")]
    MalformedResponse { message: String },

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::TokenRetrievalFailed {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage_failed(message: impl Into<String>) -> Self {
        Self::TokenStorageFailed {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn unexpected_status(status: u16) -> Self {
        Self::UnexpectedStatus { status }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(AuthError::network("refused").is_network_error());
        assert!(!AuthError::unexpected_status(500).is_network_error());
        assert!(!AuthError::retrieval_failed("locked").is_network_error());
    }

    #[test]
    fn test_status_message() {
        assert_eq!(
            AuthError::unexpected_status(502).to_string(),
            "auth provider answered with status 502"
        );
    }
}
