//! Session DTOs.

use crate::domain::entities::{AccessToken, Session};

/// Source of the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token from `--token` or `REVIEWDESK_TOKEN`.
    CommandLine,
    /// Token from system keyring.
    Keyring,
}

impl TokenSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CommandLine => "command line / environment",
            Self::Keyring => "system keyring",
        }
    }
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Session found on startup, with the token that proved it.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    /// The session.
    pub session: Session,
    /// Token to attach to backend calls.
    pub token: AccessToken,
    /// Where the token came from.
    pub source: TokenSource,
    /// Whether the token was written to the keyring during resolution.
    pub token_persisted: bool,
}
