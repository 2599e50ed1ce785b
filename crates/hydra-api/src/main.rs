//! Hydra HTTP server entry point.
//!
//! Binary name: `hydra`
//!
//! Loads configuration, wires the chat engine, and serves the HTTP surface
//! until Ctrl+C or SIGTERM.

mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hydra_infra::config::{API_KEY_ENV, load_api_key, load_config};
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "hydra", about = "Hydra conversational trading assistant", version)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (overrides the config file).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,hydra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = load_config(&cli.config).await;
    let api_key = load_api_key()
        .ok_or_else(|| anyhow::anyhow!("{API_KEY_ENV} environment variable is not set"))?;

    let state = AppState::init(&config, api_key)?;
    let router = http::router::build_router(state);

    let port = cli.port.unwrap_or(config.port);
    let addr = format!("{}:{port}", cli.host);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        trader = %config.trader_name,
        analysis_model = %config.analysis_model,
        image_model = %config.image_model,
        "Hydra listening on http://{addr}"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
