use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use channelnav::api::ApiClient;
use channelnav::app::{App, AppEvent};
use channelnav::config::Config;
use channelnav::host::{self, OpenMode};
use channelnav::{ui, util};

/// Get the config directory path (~/.config/channelnav/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("channelnav"))
}

#[derive(Parser, Debug)]
#[command(
    name = "channelnav",
    version,
    about = "Browse channel posts by category from the terminal"
)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Path to the config file (defaults to ~/.config/channelnav/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How to open post links
    #[arg(long, value_enum)]
    open_mode: Option<OpenMode>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path).context("Failed to load configuration")?;

    // CLI flags win over the config file
    if let Some(url) = args.backend_url {
        config.backend_url = url;
    }
    if let Some(mode) = args.open_mode {
        config.open_mode = mode;
    }

    let base_url = util::validate_url(&config.backend_url)
        .with_context(|| format!("Invalid backend URL '{}'", config.backend_url))?;

    let client = ApiClient::new(
        base_url,
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;

    let host = host::select(config.open_mode, config.viewer_command.clone());
    host.ready();

    let mut app = App::new(client, host, config.instant_view);

    // Event channel for background fetch tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Kick off the initial category load before the first frame
    let _ = app.spawn_load_categories(&event_tx);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
