//! Auth provider HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::USER_AGENT;
use super::dto::UserResponse;
use crate::domain::entities::{AccessToken, Session, UserId};
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionPort;

const USER_PATH: &str = "/auth/v1/user";
const API_KEY_HEADER: &str = "apikey";

/// Looks up sessions on the hosted auth provider.
pub struct AuthSessionClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AuthSessionClient {
    /// Creates client for an auth provider base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Creates client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl SessionPort for AuthSessionClient {
    async fn fetch_session(&self, token: &AccessToken) -> Result<Option<Session>, AuthError> {
        let url = format!("{}{USER_PATH}", self.base_url);

        debug!("Fetching session from auth provider");

        let mut request = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to connect to auth provider");
            if e.is_timeout() {
                AuthError::network("request timed out")
            } else if e.is_connect() {
                AuthError::network("failed to connect to auth provider")
            } else {
                AuthError::network(e.to_string())
            }
        })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!(status = %status, "Auth provider rejected token");
                return Ok(None);
            }
            s if !s.is_success() => {
                warn!(status = %s, "Auth provider returned an error status");
                return Err(AuthError::unexpected_status(s.as_u16()));
            }
            _ => {}
        }

        let user: UserResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse user response");
            AuthError::malformed(e.to_string())
        })?;

        let Some(user_id) = UserId::new(user.id) else {
            warn!("Auth provider returned an empty user id");
            return Ok(None);
        };

        debug!(user_id = %user_id, "Session found");
        Ok(Some(Session::new(user_id, user.email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode as AxumStatus, routing::get};
    use tokio::net::TcpListener;

    const GOOD_TOKEN: &str = "good.token.value";

    async fn handle_user(headers: HeaderMap) -> Result<Json<serde_json::Value>, AxumStatus> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let key = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if key != "anon" {
            return Err(AxumStatus::BAD_REQUEST);
        }
        if auth == format!("Bearer {GOOD_TOKEN}") {
            Ok(Json(serde_json::json!({ "id": "user-42", "email": "lee@example.com" })))
        } else {
            Err(AxumStatus::UNAUTHORIZED)
        }
    }

    async fn spawn_auth() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(USER_PATH, get(handle_user));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str, api_key: Option<&str>) -> AuthSessionClient {
        let http = Client::builder().no_proxy().build().unwrap();
        AuthSessionClient::with_client(http, base_url, api_key.map(str::to_string))
    }

    #[tokio::test]
    async fn test_valid_token_returns_session() {
        let url = spawn_auth().await;

        let session = client(&url, Some("anon"))
            .fetch_session(&AccessToken::new_unchecked(GOOD_TOKEN))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(session.user_id().as_str(), "user-42");
        assert_eq!(session.email(), Some("lee@example.com"));
    }

    #[tokio::test]
    async fn test_unauthorized_means_no_session() {
        let url = spawn_auth().await;

        let session = client(&url, Some("anon"))
            .fetch_session(&AccessToken::new_unchecked("stale.token.value"))
            .await
            .unwrap();

        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_other_failures_are_errors() {
        let url = spawn_auth().await;

        let err = client(&url, None)
            .fetch_session(&AccessToken::new_unchecked(GOOD_TOKEN))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UnexpectedStatus { status: 400 }));
    }

    #[tokio::test]
    async fn test_unreadable_user_is_malformed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(USER_PATH, get(|| async { "<html>login</html>" }));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let err = client(&format!("http://{addr}"), None)
            .fetch_session(&AccessToken::new_unchecked(GOOD_TOKEN))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::MalformedResponse { .. }));
    }
}
