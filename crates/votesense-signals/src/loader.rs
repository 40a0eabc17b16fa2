//! Extension points for classifier loading.

use crate::classifier::Classifier;
use crate::linear_model::{LinearModel, LinearModelSpec};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use votesense_core::{Error, Result};

/// Pluggable backend that produces the analyzer's classifier.
///
/// Implement this trait to back the fusion engine with a different model
/// family without touching the engine itself.
#[async_trait::async_trait]
pub trait ModelLoader: Send + Sync {
    /// Load the classifier; called at most once per successful initialization
    async fn load(&self) -> Result<Arc<dyn Classifier>>;

    /// Human-readable description of where the model comes from
    fn describe(&self) -> String;
}

/// Loads a [`LinearModel`] from a YAML or JSON weights file
#[derive(Debug, Clone)]
pub struct FileModelLoader {
    path: PathBuf,
}

impl FileModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ModelLoader for FileModelLoader {
    async fn load(&self) -> Result<Arc<dyn Classifier>> {
        info!("Loading classifier weights from {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::model_load(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let spec = LinearModelSpec::parse(&content, &self.path)
            .map_err(|e| Error::model_load(format!("failed to parse {}: {e}", self.path.display())))?;
        let model = LinearModel::from_spec(spec)
            .map_err(|e| Error::model_load(e.to_string()))?;

        info!(
            model = model.name(),
            features = model.feature_count(),
            "Classifier loaded"
        );

        Ok(Arc::new(model))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Hands out an already-constructed classifier
#[derive(Clone)]
pub struct StaticModelLoader {
    classifier: Arc<dyn Classifier>,
}

impl StaticModelLoader {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait::async_trait]
impl ModelLoader for StaticModelLoader {
    async fn load(&self) -> Result<Arc<dyn Classifier>> {
        Ok(Arc::clone(&self.classifier))
    }

    fn describe(&self) -> String {
        format!("static:{}", self.classifier.name())
    }
}
