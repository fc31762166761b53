//! `storyreel` binary: settings, telemetry, then the HTTP server until Ctrl-C.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use storyreel_server::{AppState, ServerConfig};
use storyreel_settings::{load_settings_from_path, settings_path};
use storyreel_telemetry::{TelemetryConfig, init_telemetry, startup_subscriber};

/// Stock-media acquisition service for transcript-driven video stories.
#[derive(Debug, Parser)]
#[command(name = "storyreel", version, about)]
struct Cli {
    /// Settings file (default: ~/.storyreel/settings.json).
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Bind address, overriding settings.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding settings.
    #[arg(long)]
    port: Option<u16>,

    /// Log filter directive, overriding settings (RUST_LOG still wins).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = cli.settings.clone().unwrap_or_else(settings_path);
    // Loader warnings precede global telemetry; they go to stderr.
    let mut settings = tracing::subscriber::with_default(startup_subscriber(), || {
        load_settings_from_path(&path)
    })
    .with_context(|| format!("failed to load settings from {}", path.display()))?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }

    let _ = init_telemetry(&TelemetryConfig {
        level: settings.logging.level.clone(),
        json: settings.logging.json,
    });
    let metrics = storyreel_telemetry::metrics::install_recorder();

    tracing::info!(settings = %path.display(), "starting storyreel");

    let state = AppState::from_settings(&settings)
        .context("failed to build HTTP client")?
        .with_metrics(metrics);
    if !state.pexels_configured() {
        tracing::warn!("PEXELS_API_KEY is not set; fetch requests will fail until configured");
    }

    let handle = storyreel_server::start(ServerConfig::from_settings(&settings), state)
        .await
        .context("failed to start server")?;
    tracing::info!(addr = %handle.local_addr(), "storyreel ready");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl+c")?;

    tracing::info!("shutting down");
    handle.shutdown().await;
    Ok(())
}
