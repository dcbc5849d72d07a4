//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "reviewdesk";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "reviewdesk";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overridden by CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Access token given on the command line or environment.
    #[serde(skip)]
    pub token: Option<String>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the review backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the auth provider.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Public API key sent to the auth provider, if it needs one.
    #[serde(default)]
    pub auth_api_key: Option<String>,

    /// HTTP timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Save a command-line token to the system keyring once it proves valid.
    #[serde(default = "default_true")]
    pub remember_token: bool,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Notification duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Directory the image picker opens in. Defaults to `$HOME`.
    #[serde(default)]
    pub start_dir: Option<PathBuf>,

    /// Show hidden files in the image picker.
    #[serde(default)]
    pub show_hidden_files: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            start_dir: None,
            show_hidden_files: false,
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_auth_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_notification_duration() -> u64 {
    5
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_base_url = api_url;
        }
        if let Some(auth_url) = args.auth_url {
            self.auth_url = auth_url;
        }
        if let Some(token) = args.token {
            self.token = Some(token);
        }
        if let Some(remember) = args.remember_token {
            self.remember_token = remember;
        }
        if let Some(notification_duration) = args.notification_duration {
            self.ui.notification_duration = notification_duration;
        }
        if let Some(start_dir) = args.start_dir {
            self.ui.start_dir = Some(start_dir);
        }
    }

    /// Returns HTTP timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns toast display duration.
    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.ui.notification_duration)
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("reviewdesk.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the directory the image picker should open in.
    #[must_use]
    pub fn effective_start_dir(&self) -> PathBuf {
        self.ui.start_dir.clone().unwrap_or_else(|| {
            std::env::var("HOME").map_or_else(|_| PathBuf::from("/"), PathBuf::from)
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            token: None,
            log_level: LogLevel::Info,
            api_base_url: default_api_base_url(),
            auth_url: default_auth_url(),
            auth_api_key: None,
            request_timeout_secs: default_request_timeout(),
            remember_token: true,
            ui: UiConfig::default(),
        }
    }
}
