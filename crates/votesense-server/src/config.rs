//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use votesense_engine::EngineConfig;
use votesense_signals::SignalsConfig;

/// Server configuration, loaded from YAML with CLI overrides on top
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// When the classifier is loaded
    #[serde(default)]
    pub model_load: ModelLoadMode,

    /// Largest accepted batch; larger requests get 413
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Lexicon, emoji and model source
    #[serde(default)]
    pub signals: SignalsConfig,

    /// Fusion weights and thresholds
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub port: Option<u16>,
    pub model_path: Option<PathBuf>,
    pub lazy: bool,
    pub json_logs: bool,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: impl AsRef<Path>, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();

        // Fall back to defaults when no file is present
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply(overrides);
        config.engine.validate()?;

        if config.max_batch_size == 0 {
            anyhow::bail!("max_batch_size must be at least 1");
        }

        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(listen) = &overrides.listen {
            self.listen = listen.clone();
        }

        if let Some(port) = overrides.port {
            self.port = port;
        }

        if let Some(path) = &overrides.model_path {
            self.signals.model.path = path.clone();
        }

        if overrides.lazy {
            self.model_load = ModelLoadMode::Lazy;
        }

        if overrides.json_logs {
            self.log_format = LogFormat::Json;
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            model_load: ModelLoadMode::default(),
            max_batch_size: default_max_batch_size(),
            log_format: LogFormat::default(),
            signals: SignalsConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// When the classifier is loaded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelLoadMode {
    /// Load during startup; a failure aborts the process
    #[default]
    Eager,
    /// Load on the first analysis request
    Lazy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_batch_size() -> usize {
    1000
}
