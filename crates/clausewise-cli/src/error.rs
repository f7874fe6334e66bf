//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline construction error
    #[error("{0}")]
    Analyzer(#[from] clausewise_analyzer::AnalyzerError),

    /// Rule or playbook error
    #[error("{0}")]
    Risk(#[from] clausewise_risk::RiskError),

    /// Segmenter setup error
    #[error("{0}")]
    Segmenter(#[from] clausewise_segmenter::SegmenterError),

    /// Classifier setup error
    #[error("{0}")]
    Classifier(#[from] clausewise_classifier::ClassifierError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
