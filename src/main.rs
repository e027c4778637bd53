//! `data-profiler` server binary.
//!
//! # Endpoints
//!
//! - `POST /upload`: CSV/XLSX upload or MySQL table → profile JSON
//! - `GET  /health`: liveness

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use data_profiler::server::config::{DEFAULT_MAX_UPLOAD_MB, DEFAULT_UPLOAD_DIR};
use data_profiler::server::{build_app, AppState, ServerConfig};

/// Profile tabular data over HTTP.
#[derive(Parser, Debug)]
#[command(name = "data-profiler", version, about)]
struct Cli {
    /// Bind address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Directory uploaded files are stored in (created if missing).
    #[arg(long, default_value = DEFAULT_UPLOAD_DIR)]
    upload_dir: PathBuf,

    /// Maximum request body size in MiB (0 = unbounded).
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::new(cli.upload_dir).with_max_upload_mb(cli.max_upload_mb);
    config.ensure_upload_dir()?;

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    tracing::info!(
        %addr,
        upload_dir = %config.upload_dir.display(),
        max_upload_bytes = ?config.max_upload_bytes,
        "data-profiler starting"
    );

    let app = build_app(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("data-profiler stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
