//! GenRelay server entry point

mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use genrelay_core::config::RelayConfig;
use genrelay_core::relay::Relay;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "genrelay-server", about = "LLM generation relay server")]
struct Cli {
    #[arg(long, env = "GENRELAY_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    #[arg(long, env = "IDIOMS_PATH", default_value = "idioms.json")]
    idioms_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = RelayConfig::from_env().context("invalid relay configuration")?;
    if config.api_key.is_none() {
        warn!("no provider API key configured; generation requests will be rejected");
    }

    let relay = Relay::from_config(&config).context("failed to initialize relay")?;
    info!(provider = relay.provider_name(), "relay initialized");

    let state = routes::AppState {
        relay: Arc::new(relay),
        idioms_path: cli.idioms_path,
    };
    let app = routes::router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
