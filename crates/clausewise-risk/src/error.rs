//! Risk engine error types

use thiserror::Error;

/// Errors that can occur while building a rule set
///
/// Rule evaluation never fails; every error here is a configuration error
/// surfaced at load time.
#[derive(Error, Debug)]
pub enum RiskError {
    /// A rule pattern failed to compile
    #[error("Rule {rule_id}: invalid pattern '{pattern}': {source}")]
    Pattern {
        /// Rule owning the pattern
        rule_id: String,
        /// The offending pattern text
        pattern: String,
        /// Compile error
        #[source]
        source: regex::Error,
    },

    /// A playbook rule lacks a required key
    #[error("Playbook rule #{index}: missing required field '{field}'")]
    MissingField {
        /// Zero-based position in the playbook's rule list
        index: usize,
        /// Missing key, as spelled in the playbook
        field: String,
    },

    /// A playbook rule has a key with an unusable value
    #[error("Playbook rule #{index}: invalid field '{field}': {reason}")]
    InvalidField {
        /// Zero-based position in the playbook's rule list
        index: usize,
        /// Offending key
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Playbook file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Playbook document is not valid JSON/TOML or has the wrong shape
    #[error("Playbook parse error: {0}")]
    Parse(String),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
