//! Kaomoji Web Server Binary
//!
//! Serves the kaomoji generator and color lookup pages.
//!
//! # Usage
//!
//! ```bash
//! # Listen on $PORT (default 3000) on all interfaces
//! OPENAI_API_KEY=sk-... kaomoji-web
//!
//! # Explicit config file and port
//! kaomoji-web --config ./config.toml --port 8080
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kaomoji_web::branding::{APP_DESCRIPTION, APP_DISPLAY_NAME};
use kaomoji_web::config::Config;
use kaomoji_web::web;

/// Kaomoji Web - kaomoji generator and color lookup pages
#[derive(Parser, Debug)]
#[command(author, version, about = APP_DESCRIPTION, long_about = None)]
struct Args {
    /// Path to a TOML config file.
    /// Defaults to the platform-specific config directory:
    /// - Linux: ~/.config/kaomoji-web/config.toml
    /// - macOS: ~/Library/Application Support/kaomoji-web/config.toml
    /// - Windows: %APPDATA%\kaomoji-web\config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and $PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config and $HOST)
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Loads the config and applies command-line overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply_overrides(args.port, args.host.as_deref());
    config.validate()?;

    Ok(config)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("{} v{}", APP_DISPLAY_NAME, env!("CARGO_PKG_VERSION"));

    let result = match load_config(&args) {
        Ok(config) => web::run_server(config).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        error!("{err:#}");
        std::process::exit(1);
    }
}
