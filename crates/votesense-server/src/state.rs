//! Application state shared across all requests

use crate::config::{ModelLoadMode, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;
use votesense_engine::{AnalyzerBuilder, SharedAnalyzer};
use votesense_signals::ModelLoader;

#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Process-wide analyzer, loaded once
    pub analyzer: SharedAnalyzer,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Build state using the model file named in the configuration
    pub async fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> anyhow::Result<Self> {
        let loader = Arc::new(config.signals.model_loader());
        Self::with_loader(config, loader, metrics_handle).await
    }

    /// Build state around an explicit model loader
    ///
    /// With eager loading the classifier is loaded before this returns.
    pub async fn with_loader(
        config: ServerConfig,
        loader: Arc<dyn ModelLoader>,
        metrics_handle: PrometheusHandle,
    ) -> anyhow::Result<Self> {
        let builder = AnalyzerBuilder::from_config(&config.signals, config.engine.clone())?;
        let analyzer = SharedAnalyzer::new(builder, loader);

        match config.model_load {
            ModelLoadMode::Eager => {
                analyzer.preload().await?;
                info!("Classifier loaded from {}", analyzer.model_source());
            }
            ModelLoadMode::Lazy => {
                info!("Classifier from {} will load on first request", analyzer.model_source());
            }
        }

        Ok(Self {
            config: Arc::new(config),
            analyzer,
            metrics_handle,
        })
    }
}
