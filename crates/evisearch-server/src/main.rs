//! evisearch - Federated medical-literature search service
//!
//! Fans clinical queries out to six bibliographic sources, reconciles and
//! classifies the results, and serves them with local guideline/CQ matches
//! over a small JSON API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use evisearch_server::{AppState, Config, logging, routes};

#[derive(Parser)]
#[command(name = "evisearch")]
#[command(about = "Federated medical-literature search service")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Config file path (default: ./evisearch.toml or ~/.config/evisearch/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address override
    #[arg(long)]
    bind: Option<String>,

    /// Port override
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    let mut config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .context("invalid bind address")?;

    let state = AppState::new(config);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    log::info!("listening on {addr}");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server exited")?;

    Ok(())
}
