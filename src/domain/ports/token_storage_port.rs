//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AccessToken;
use crate::domain::errors::AuthError;

/// Port for access token persistence.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AccessToken>, AuthError>;

    /// Stores token securely.
    async fn store_token(&self, token: &AccessToken) -> Result<(), AuthError>;

}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory token storage for tests.
    pub struct MockTokenStorage {
        token: Arc<RwLock<Option<AccessToken>>>,
    }

    impl MockTokenStorage {
        pub fn new() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
            }
        }

        pub fn with_token(token: AccessToken) -> Self {
            Self {
                token: Arc::new(RwLock::new(Some(token))),
            }
        }
    }

    impl Default for MockTokenStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TokenStoragePort for MockTokenStorage {
        async fn get_token(&self) -> Result<Option<AccessToken>, AuthError> {
            Ok(self.token.read().await.clone())
        }

        async fn store_token(&self, token: &AccessToken) -> Result<(), AuthError> {
            *self.token.write().await = Some(token.clone());
            Ok(())
        }
    }
}
