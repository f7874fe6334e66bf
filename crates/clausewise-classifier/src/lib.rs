//! Clausewise Classifier
//!
//! Labels clauses with contract categories by weighted pattern scoring.
//!
//! Every category owns a set of case-insensitive patterns. A pattern that
//! matches the clause title adds the title weight (2.0 by default); one that
//! matches the body adds the text weight (1.0). Categories are ranked by
//! score with a fixed priority list breaking ties, and a clause matching
//! nothing is labelled `GENERAL`.

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod table;

pub use classifier::{CategoryScore, ClauseClassifier};
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use table::{Category, CategoryTable, PRIORITY};
