//! Table data server.
//!
//! Serves the rows of one table as JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ request id ──▶ trace ──▶ metrics ──▶ router
//!                                                    │
//!                          GET /  ◀──────────────────┤
//!                                                    │
//!             /api/dados ◀── CORS layer ◀────────────┘
//!                 │
//!                 ├─ HEAD ─▶ 200, empty
//!                 └─ GET  ─▶ TableSource (blocking pool)
//!                              ├─ Ok(data)  ─▶ 200 + JSON
//!                              └─ Err(e)    ─▶ 500 + error mapping
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use dados_api::config::{load_config, validate_config, ConfigError, ServerConfig};
use dados_api::error::ServerError;
use dados_api::lifecycle::{wait_for_signal, Shutdown};
use dados_api::observability::{logging, metrics};
use dados_api::source::{JsonFileSource, TableSource};
use dados_api::HttpServer;

#[derive(Parser)]
#[command(name = "dados-api")]
#[command(about = "Serves a database table as JSON over HTTP", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `source.data_file`.
    #[arg(long)]
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(path) = args.data_file {
        config.source.data_file = path;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("dados-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        table = %config.source.table,
        data_file = %config.source.data_file.display(),
        origins = ?config.cors.allowed_origins,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = metrics::parse_metrics_address(&config.observability.metrics_address)?;
        metrics::init_metrics(addr)?;
    }

    let source: Arc<dyn TableSource> = Arc::new(JsonFileSource::new(
        config.source.table.clone(),
        config.source.data_file.clone(),
    ));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, source)?;

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.trigger();
        }
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
