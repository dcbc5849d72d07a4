//! HTTP adapters for the review backend and the auth provider.

mod dto;
mod review_client;
mod session_client;

pub use review_client::ReviewApiClient;
pub use session_client::AuthSessionClient;

const USER_AGENT: &str = concat!("reviewdesk/", env!("CARGO_PKG_VERSION"));
