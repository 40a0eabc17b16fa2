//! Process-wide analyzer handle with one-time initialization
//!
//! Created once at startup and injected wherever analysis is needed. The
//! classifier is loaded either eagerly through [`SharedAnalyzer::preload`] or
//! on first demand; concurrent first callers wait on the same load. A failed
//! load leaves the handle uninitialized so a later call can try again.

use crate::analyzer::{AnalyzerBuilder, SentimentAnalyzer};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use votesense_core::{Error, Result};
use votesense_signals::ModelLoader;

#[derive(Clone)]
pub struct SharedAnalyzer {
    inner: Arc<SharedInner>,
}

struct SharedInner {
    builder: AnalyzerBuilder,
    loader: Arc<dyn ModelLoader>,
    analyzer: OnceCell<Arc<SentimentAnalyzer>>,
}

impl SharedAnalyzer {
    pub fn new(builder: AnalyzerBuilder, loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            inner: Arc::new(SharedInner {
                builder,
                loader,
                analyzer: OnceCell::new(),
            }),
        }
    }

    /// Wrap an analyzer that is already built
    pub fn ready(analyzer: SentimentAnalyzer, builder: AnalyzerBuilder, loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            inner: Arc::new(SharedInner {
                builder,
                loader,
                analyzer: OnceCell::new_with(Some(Arc::new(analyzer))),
            }),
        }
    }

    /// Get the analyzer, loading the classifier on first use
    pub async fn get_or_init(&self) -> Result<Arc<SentimentAnalyzer>> {
        let analyzer = self
            .inner
            .analyzer
            .get_or_try_init(|| async {
                info!("Initializing classifier from {}", self.inner.loader.describe());

                let classifier = self.inner.loader.load().await.map_err(|e| {
                    warn!(error = %e, "Classifier load failed");
                    match e {
                        Error::ModelLoad(_) => e,
                        other => Error::model_load(other.to_string()),
                    }
                })?;

                self.inner.builder.build(classifier).map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(analyzer))
    }

    /// Get the analyzer without triggering a load
    pub fn get(&self) -> Result<Arc<SentimentAnalyzer>> {
        self.inner
            .analyzer
            .get()
            .cloned()
            .ok_or(Error::UninitializedModel)
    }

    /// Load eagerly, typically during startup
    pub async fn preload(&self) -> Result<()> {
        self.get_or_init().await.map(|_| ())
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.analyzer.initialized()
    }

    /// Where the classifier comes from
    pub fn model_source(&self) -> String {
        self.inner.loader.describe()
    }
}

impl std::fmt::Debug for SharedAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedAnalyzer")
            .field("model_source", &self.model_source())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
