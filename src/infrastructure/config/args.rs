use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "reviewdesk",
    version,
    about = "A terminal client for submitting product reviews",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the review backend.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Base URL of the auth provider.
    #[arg(long, value_name = "URL")]
    pub auth_url: Option<String>,

    /// Access token.
    #[arg(long, env = "REVIEWDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Save a valid command-line token to the system keyring.
    #[arg(long)]
    pub remember_token: Option<bool>,

    /// Notification duration in seconds.
    #[arg(long)]
    pub notification_duration: Option<u64>,

    /// Directory the image picker opens in.
    #[arg(long, value_name = "PATH")]
    pub start_dir: Option<PathBuf>,
}
