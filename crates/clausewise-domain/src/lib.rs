//! Clausewise Domain Layer
//!
//! This crate contains the value types that flow through the contract review
//! pipeline. It has no external dependencies and defines the fundamental
//! concepts every other crate builds on.
//!
//! ## Key Concepts
//!
//! - **ClauseNode**: A located clause heading with its body text and nested sub-clauses
//! - **Classification**: Ordered legal categories assigned to a clause
//! - **EnrichedClause**: A clause composed with its classification and extracted entities
//! - **Severity**: Ordered risk level (LOW < MEDIUM < HIGH)
//! - **AnalysisContext**: Contract type and reviewing party's perspective
//!
//! ## Architecture
//!
//! ```text
//! text → segmenter → ClauseNode forest → classifier + entities → EnrichedClause → risk engine
//! ```
//!
//! The stages only share data through these types; none of them call each other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod clause;
pub mod context;
pub mod entities;
pub mod severity;
pub mod traits;

// Re-exports for convenience
pub use classification::{Classification, EnrichedClause, GENERAL_CATEGORY};
pub use clause::{ClauseId, ClauseNode};
pub use context::AnalysisContext;
pub use entities::EntitySet;
pub use severity::Severity;
pub use traits::{EntityExtractor, NoEntities};
