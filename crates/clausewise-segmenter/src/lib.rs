//! Clausewise Segmenter
//!
//! Locates clause headings in raw contract text and builds a clause tree.
//!
//! # Overview
//!
//! Extracted contract text is noisy: page footers, addresses and signature
//! blocks all begin with numbers that look like clause headings. The
//! segmenter applies a strict heading grammar, discards page furniture, nests
//! dotted sub-clauses under their parents and folds fragments too short to
//! stand alone into the clause before them.
//!
//! # Architecture
//!
//! ```text
//! Text → scan (HeadingGrammar) → assemble → reorganize → merge → [ClauseNode]
//!          └─ no headings ───────→ paragraph fallback ──────────→ [ClauseNode]
//! ```
//!
//! # Example Usage
//!
//! ```
//! use clausewise_segmenter::ClauseTreeBuilder;
//!
//! let builder = ClauseTreeBuilder::default_config()?;
//! let clauses = builder.segment("1. Term\nThis agreement runs one year. It renews.\n1.1 Renewal\nAutomatic.");
//!
//! assert_eq!(clauses.len(), 1);
//! assert_eq!(clauses[0].children[0].id.as_str(), "1.1");
//! # Ok::<(), clausewise_segmenter::SegmenterError>(())
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod grammar;
mod noise;

pub use builder::{ClauseTreeBuilder, LocatedHeading};
pub use config::SegmenterConfig;
pub use error::SegmenterError;
pub use grammar::{Heading, HeadingGrammar, LineKind, NoiseVocabulary, Rejection};
pub use noise::NoiseFilter;

use clausewise_domain::ClauseNode;

/// Segment text with the default configuration
///
/// Convenience for one-off calls; build a [`ClauseTreeBuilder`] once and
/// reuse it when segmenting many documents.
pub fn segment(text: &str) -> Result<Vec<ClauseNode>, SegmenterError> {
    Ok(ClauseTreeBuilder::default_config()?.segment(text))
}
