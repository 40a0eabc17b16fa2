//! Error types for VoteSense

/// Result type alias using VoteSense's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for VoteSense operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty or otherwise unusable request input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Classifier output violated the label/probability contract
    #[error("invalid model output: {0}")]
    InvalidModelOutput(String),

    /// Classifier requested before the one-time load ran
    #[error("model not initialized")]
    UninitializedModel,

    /// The one-time model load failed
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new invalid model output error
    pub fn invalid_model_output(msg: impl Into<String>) -> Self {
        Self::InvalidModelOutput(msg.into())
    }

    /// Create a new model load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short machine-readable name, used for metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidModelOutput(_) => "invalid_model_output",
            Self::UninitializedModel => "uninitialized_model",
            Self::ModelLoad(_) => "model_load",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("text must not be empty");
        assert_eq!(err.to_string(), "invalid input: text must not be empty");
        assert!(err.is_client_error());

        let err = Error::invalid_model_output("label 7 out of range");
        assert_eq!(err.kind(), "invalid_model_output");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.kind(), "io");
    }
}
