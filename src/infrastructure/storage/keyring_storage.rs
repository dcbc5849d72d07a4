//! Keyring-backed access token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::AccessToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::TokenStoragePort;

const KEYRING_SERVICE: &str = "reviewdesk";
const KEYRING_USER: &str = "access-token";

/// Stores the auth provider access token in the system keyring.
pub struct KeyringTokenStorage {
    service: String,
    user: String,
}

impl KeyringTokenStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            user: KEYRING_USER.to_string(),
        }
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, AuthError> {
        Entry::new(&self.service, &self.user)
            .map_err(|e| AuthError::retrieval_failed(format!("failed to access keyring: {e}")))
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AccessToken>, AuthError> {
        debug!(service = %self.service, "Retrieving token from keyring");

        let entry = self.entry()?;

        match entry.get_password() {
            Ok(password) => {
                let token = AccessToken::new(password);
                if token.is_none() {
                    warn!("Ignoring malformed token found in keyring");
                }
                Ok(token)
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No token stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve token from keyring");
                Err(AuthError::retrieval_failed(e.to_string()))
            }
        }
    }

    async fn store_token(&self, token: &AccessToken) -> Result<(), AuthError> {
        debug!(service = %self.service, "Storing token in keyring");

        let entry = self.entry()?;

        entry.set_password(token.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to store token in keyring");
            AuthError::storage_failed(e.to_string())
        })?;

        debug!(token = %token.masked(), "Token stored in keyring");
        Ok(())
    }
}
