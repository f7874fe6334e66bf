//! Error types for the classifier

use thiserror::Error;

/// Errors that can occur while building a classifier
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// A category pattern failed to compile
    #[error("Invalid pattern for category {category}: {source}")]
    Pattern {
        /// Category owning the pattern
        category: String,
        /// Compile error
        #[source]
        source: regex::Error,
    },

    /// Invalid classifier configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
