//! Session lookup port definition.

use async_trait::async_trait;

use crate::domain::entities::{AccessToken, Session};
use crate::domain::errors::AuthError;

/// Port for the hosted auth provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Looks up the session behind a token. `None` means no valid session.
    async fn fetch_session(&self, token: &AccessToken) -> Result<Option<Session>, AuthError>;
}
