//! Review backend HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::USER_AGENT;
use super::dto::ErrorResponse;
use crate::domain::entities::AccessToken;
use crate::domain::errors::ReviewError;
use crate::domain::ports::{ReviewPayload, ReviewPort, ReviewReceipt};

const REVIEWS_PATH: &str = "/api/reviews";
const STORAGE_PATH: &str = "/api/storage";

/// HTTP adapter for the review backend.
pub struct ReviewApiClient {
    client: Client,
    base_url: String,
}

impl ReviewApiClient {
    /// Creates client for a backend base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn rejection(status: StatusCode, body: &str) -> ReviewError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error);
        ReviewError::rejected(status.as_u16(), message)
    }
}

fn map_send_error(e: &reqwest::Error) -> ReviewError {
    warn!(error = %e, "Failed to reach review backend");
    if e.is_timeout() {
        ReviewError::network("request timed out")
    } else if e.is_connect() {
        ReviewError::network("failed to connect to the review server")
    } else {
        ReviewError::network(e.to_string())
    }
}

#[async_trait]
impl ReviewPort for ReviewApiClient {
    async fn submit_review(
        &self,
        token: Option<&AccessToken>,
        payload: &ReviewPayload,
    ) -> Result<ReviewReceipt, ReviewError> {
        let url = self.url(REVIEWS_PATH);

        debug!(url = %url, images = payload.image_files.len(), "Posting review");

        let mut request = self.client.post(&url).json(payload);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(|e| map_send_error(&e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReviewError::network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            warn!(status = %status, "Review rejected by backend");
            return Err(Self::rejection(status, &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse review response");
            ReviewError::unexpected(format!("failed to parse response: {e}"))
        })?;

        Ok(ReviewReceipt::from_body(value))
    }

    async fn ensure_storage(&self) -> Result<(), ReviewError> {
        let url = self.url(STORAGE_PATH);
        debug!(url = %url, "Pinging storage initialization endpoint");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        debug!(status = %response.status(), "Storage initialization responded");
        Ok(())
    }
}
