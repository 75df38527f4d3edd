//! Daydash Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Looked up in order: `--config PATH`, the user config dir,
//! `/etc/daydash/config.toml`, `./config.toml`. Environment overrides:
//! - `DAYDASH_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DAYDASH_PORT`: Port to listen on (default: 8091)
//! - `DAYDASH_TIDE_STATION`: NOAA tide station id
//! - `DAYDASH_TEAM`: Tracked team abbreviation
//! - `DAYDASH_THEME`: Default theme
//! - `DAYDASH_LOG_LEVEL` / `DAYDASH_LOG_FORMAT`: Logging

use clap::Parser;
use daydash::api::{serve, AppState};
use daydash::board::Board;
use daydash::config::{generate_default_config, Config};
use daydash::scheduler::WidgetScheduler;
use daydash::theme::ThemeStore;
use daydash::widgets::build_registry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "daydash", version, about = "Personal dashboard service")]
struct Args {
    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a default config file and exit
    #[arg(long)]
    generate_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.generate_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config);

    tracing::info!("Starting Daydash v{}", env!("CARGO_PKG_VERSION"));

    let client = reqwest::Client::builder()
        .user_agent(concat!("daydash/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let store_path = config
        .theme
        .store_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(ThemeStore::default_path);
    let themes = Arc::new(ThemeStore::new(
        store_path,
        config.theme.default.clone(),
        config.theme.available.clone(),
    ));

    let board = Board::new(themes.load());
    tracing::info!("Active theme: {}", board.theme().await);

    let scheduler = Arc::new(WidgetScheduler::new(board.clone()));
    let registry = build_registry(&config, &client);
    tracing::info!("Registering {} widgets", registry.len());
    scheduler.register_all(registry).await;

    let scheduler_handle = scheduler.clone().start();

    let state = AppState::new(board, scheduler.clone(), themes);
    serve(state, &config.server.addr()).await?;

    scheduler.stop().await;
    scheduler_handle.abort();
    tracing::info!("Daydash stopped");

    Ok(())
}

/// Initialize tracing from the logging config
fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("daydash={},tower_http=info", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
