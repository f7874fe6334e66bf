//! Error types for contract analysis

use clausewise_classifier::ClassifierError;
use clausewise_risk::RiskError;
use clausewise_segmenter::SegmenterError;
use thiserror::Error;

/// Errors raised while assembling an analysis pipeline
///
/// Running an assembled pipeline never fails; these only surface from
/// construction (bad patterns, invalid configuration, unreadable playbooks).
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Segmenter construction failed
    #[error("Segmenter error: {0}")]
    Segmenter(#[from] SegmenterError),

    /// Classifier construction failed
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Rule set or engine construction failed
    #[error("Risk engine error: {0}")]
    Risk(#[from] RiskError),
}
