use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use glasspane_core::config::DashboardConfig;
use glasspane_server::build_router;
use glasspane_server::infra::startup::{bootstrap, spawn_initial_load};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "glasspane-server")]
#[command(about = "Serves Glasspane dashboard state to a rendering layer")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "GLASSPANE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "GLASSPANE_PORT", default_value_t = 8080)]
    port: u16,

    /// Configuration file (TOML or JSON). Without it the usual environment
    /// variables and default locations are searched.
    #[arg(long, env = "GLASSPANE_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Dashboard JSON document (overrides `storage.path` from the config)
    #[arg(long, env = "GLASSPANE_DATA_PATH")]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_loaded {
        info!("loaded .env file");
    }

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load_from_file(path)?,
        None => {
            let (config, source) = DashboardConfig::load_from_env()
                .context("failed to load configuration")?;
            info!(?source, "configuration loaded");
            config
        }
    };
    if let Some(data) = cli.data {
        config.storage.path = Some(data);
    }

    let state = bootstrap(config)?;
    let storage = state.storage.clone();
    spawn_initial_load(&state);
    let router = build_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting Glasspane on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    if let Err(e) = storage.flush().await {
        warn!("failed to flush pending writes: {e}");
    }
    info!("Glasspane stopped");
    Ok(())
}
