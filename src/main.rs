use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use reviewdesk::infrastructure::{
    AppConfig, AuthSessionClient, CliArgs, KeyringTokenStorage, ReviewApiClient, StateConfig,
    StorageManager,
};
use reviewdesk::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, Option<StorageManager>)> {
    let args = CliArgs::parse();

    let storage = match StorageManager::new() {
        Ok(storage) => Some(storage),
        Err(e) => {
            eprintln!("warning: {e}, using default configuration");
            None
        }
    };

    let mut config = match &storage {
        Some(storage) => storage.load_config(args.config.as_deref())?,
        None => AppConfig::default(),
    };
    config.merge_with_args(args);

    Ok((config, storage))
}

fn create_app(config: &AppConfig, state: &StateConfig) -> Result<App> {
    let review_client = Arc::new(ReviewApiClient::new(
        config.api_base_url.clone(),
        config.request_timeout(),
    )?);
    let session_client = Arc::new(AuthSessionClient::new(
        config.auth_url.clone(),
        config.auth_api_key.clone(),
        config.request_timeout(),
    )?);
    let token_storage = Arc::new(KeyringTokenStorage::new());

    Ok(App::new(
        review_client,
        session_client,
        token_storage,
        config,
        state,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let (config, storage) = load_config()?;
    init_logging(&config)?;

    info!(
        version = reviewdesk::VERSION,
        api = %config.api_base_url,
        auth = %config.auth_url,
        "Starting {}",
        reviewdesk::NAME
    );

    let state = match storage.as_ref().map(StorageManager::load_state).transpose() {
        Ok(state) => state.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Failed to load state, starting fresh");
            StateConfig::default()
        }
    };

    let app = create_app(&config, &state)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    let state = result?;
    if let Some(storage) = &storage {
        if let Err(e) = storage.save_state(&state) {
            warn!(error = %e, "Failed to save state");
        }
    }

    Ok(())
}
