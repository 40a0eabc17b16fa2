//! VoteSense Server
//!
//! Sentiment analysis service for voter feedback on blockchain voting.
//!
//! Serves single-text and batch analysis over HTTP/JSON, plus health and
//! Prometheus metrics endpoints.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

use votesense_server::{create_router, AppState, ConfigOverrides, LogFormat, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "votesense-server")]
#[command(about = "VoteSense voter-feedback sentiment service", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "VOTESENSE_CONFIG", default_value = "votesense.yaml")]
    config: PathBuf,

    /// Model weights file (YAML or JSON)
    #[arg(short, long, env = "VOTESENSE_MODEL")]
    model: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, env = "VOTESENSE_LISTEN")]
    listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "VOTESENSE_PORT")]
    port: Option<u16>,

    /// Defer model loading to the first request
    #[arg(long)]
    lazy: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen: self.listen.clone(),
            port: self.port,
            model_path: self.model.clone(),
            lazy: self.lazy,
            json_logs: self.json_logs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli.overrides())?;

    init_tracing(cli.verbose, config.log_format);

    info!("Starting VoteSense server");
    info!("Configuration loaded from {}", cli.config.display());
    info!("Model: {}", config.signals.model.path.display());
    info!("Model load: {:?}", config.model_load);
    info!("Max batch size: {}", config.max_batch_size);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    let addr: SocketAddr = config.socket_addr().parse()?;
    let state = AppState::new(config, metrics_handle).await?;
    info!("Application state initialized successfully");

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    // Graceful shutdown handler
    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool, format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("votesense=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("votesense=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!("votesense_requests_total", "Total number of requests by endpoint");
    metrics::describe_counter!(
        "votesense_sentiment_total",
        "Total number of analyzed texts by ensemble label"
    );
    metrics::describe_histogram!(
        "votesense_analysis_latency_us",
        metrics::Unit::Microseconds,
        "Per-text analysis latency in microseconds"
    );
    metrics::describe_counter!("votesense_errors_total", "Total number of errors by kind");

    info!("Metrics exporter initialized");
    Ok(handle)
}
