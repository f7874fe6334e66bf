//! Error types for the segmenter

use thiserror::Error;

/// Errors that can occur while building a segmenter
///
/// Segmenting text never fails; these only surface from construction.
#[derive(Error, Debug)]
pub enum SegmenterError {
    /// A grammar pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Invalid segmenter configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
