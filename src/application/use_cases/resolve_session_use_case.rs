//! Session resolution use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{ResolvedSession, TokenSource};
use crate::domain::entities::AccessToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::{SessionPort, TokenStoragePort};

/// Finds an access token and asks the auth provider whose session it is.
#[derive(Clone)]
pub struct ResolveSessionUseCase {
    session_port: Arc<dyn SessionPort>,
    storage_port: Arc<dyn TokenStoragePort>,
    remember_token: bool,
}

impl ResolveSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        session_port: Arc<dyn SessionPort>,
        storage_port: Arc<dyn TokenStoragePort>,
        remember_token: bool,
    ) -> Self {
        Self {
            session_port,
            storage_port,
            remember_token,
        }
    }

    /// Resolves the current session.
    ///
    /// Token priority:
    /// 1. CLI/Env (passed as argument)
    /// 2. Keyring
    ///
    /// Returns `Ok(None)` when there is no token or the provider does not
    /// recognise it.
    ///
    /// # Errors
    /// Returns error if the provider cannot be reached.
    pub async fn execute(
        &self,
        cli_token: Option<String>,
    ) -> Result<Option<ResolvedSession>, AuthError> {
        let Some((token, source)) = self.resolve_token(cli_token).await else {
            debug!("No token found in any source");
            return Ok(None);
        };

        debug!(source = %source, token = %token, "Looking up session");

        let Some(session) = self.session_port.fetch_session(&token).await? else {
            warn!(source = %source, "Token has no valid session");
            return Ok(None);
        };

        info!(user_id = %session.user_id(), source = %source, "Session resolved");

        let token_persisted = if source == TokenSource::CommandLine && self.remember_token {
            match self.storage_port.store_token(&token).await {
                Ok(()) => {
                    info!("Token persisted to secure storage");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist token to secure storage");
                    false
                }
            }
        } else {
            false
        };

        Ok(Some(ResolvedSession {
            session,
            token,
            source,
            token_persisted,
        }))
    }

    async fn resolve_token(&self, cli_token: Option<String>) -> Option<(AccessToken, TokenSource)> {
        if let Some(token_str) = cli_token.filter(|s| !s.trim().is_empty()) {
            if let Some(token) = AccessToken::new(token_str) {
                return Some((token, TokenSource::CommandLine));
            }
            warn!("Command-line token has invalid format, ignoring it");
        }

        match self.storage_port.get_token().await {
            Ok(Some(token)) => Some((token, TokenSource::Keyring)),
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "Failed to check keyring");
                None
            }
        }
    }
}
