//! Authenticated session entities.

use std::fmt;

/// Identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id. Blank values are rejected.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns id as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    email: Option<String>,
}

impl Session {
    /// Creates new session.
    #[must_use]
    pub const fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }

    /// Returns the user id.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the email, if the provider exposed one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the best label for the status line.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email().unwrap_or_else(|| self.user_id.as_str())
    }
}
