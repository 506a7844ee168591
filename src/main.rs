//! Tubeloader - YouTube Download API
//!
//! A small HTTP service that wraps yt-dlp extraction: look up video
//! metadata, list downloadable formats, and redirect to (or relay) the
//! media bytes for a selected format.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tubeloader::api::{build_router, AppState};
use tubeloader::utils::Settings;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind the listener to
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Explicit path to the yt-dlp binary, skipping discovery
    #[arg(long)]
    ytdlp_path: Option<PathBuf>,

    /// Upstream extraction timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Environment first, CLI flags on top
    let mut settings = Settings::from_env();
    if let Some(bind) = args.bind {
        settings.bind = bind;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(path) = args.ytdlp_path {
        settings.ytdlp_path = Some(path);
    }
    if let Some(secs) = args.timeout {
        settings.upstream_timeout_secs = secs;
    }

    let addr = settings
        .socket_addr()
        .context("invalid bind address in configuration")?;

    let state = Arc::new(AppState::new(settings).context("failed to initialize service state")?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running API server")?;

    Ok(())
}

async fn shutdown_signal() {
    // A failed handler only costs us graceful shutdown; the process still
    // terminates when the signal fires.
    if let Err(err) = signal::ctrl_c().await {
        eprintln!("Failed to install Ctrl+C handler: {}", err);
    }
    info!("Shutdown signal received");
}
