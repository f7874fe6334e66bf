//! Clausewise contract analysis
//!
//! Composes the segmenter, classifier and risk engine into one pipeline:
//!
//! ```text
//! text → ClauseTreeBuilder → ClauseClassifier (+ EntityExtractor) → RiskEngine → ContractAnalysis
//! ```
//!
//! A contract from which no clause can be recovered is reported as
//! [`AnalysisStatus::ParseFailed`] with no overall severity, so callers can
//! route it to manual review.
//!
//! # Example
//!
//! ```
//! use clausewise_analyzer::{AnalysisStatus, ContractAnalyzer};
//! use clausewise_domain::{AnalysisContext, Severity};
//!
//! let analyzer = ContractAnalyzer::builtin().unwrap();
//! let analysis = analyzer.analyze_text(
//!     "1. Indemnification\nParty shall indemnify and defend against any and all claims.",
//!     &AnalysisContext::none(),
//! );
//!
//! assert_eq!(analysis.status, AnalysisStatus::Success);
//! assert_eq!(analysis.risk.clause_results[0].risk_level, Severity::High);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analyzer;
mod error;
mod types;

pub use analyzer::ContractAnalyzer;
pub use error::AnalyzerError;
pub use types::{AnalysisStatus, AnalysisSummary, ContractAnalysis};
