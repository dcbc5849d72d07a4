use serde::Deserialize;

/// Auth provider user response.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: String,
    /// Email, when the provider exposes it.
    #[serde(default)]
    pub email: Option<String>,
}

/// Error body returned by the review backend.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error.
    #[serde(default)]
    pub error: Option<String>,
}
