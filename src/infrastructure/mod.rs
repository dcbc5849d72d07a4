//! Infrastructure layer with external service adapters.

/// Review backend and auth provider clients.
pub mod api;
/// Application configuration.
pub mod config;
/// Token storage adapters.
pub mod storage;

pub use api::{AuthSessionClient, ReviewApiClient};
pub use config::{AppConfig, CliArgs, LogLevel, StateConfig, StorageManager};
pub use storage::KeyringTokenStorage;
