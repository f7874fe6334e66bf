//! Clausewise Risk
//!
//! Perspective-aware rule engine that flags risky contract clauses.
//!
//! The engine provides:
//! - A built-in table of rules for indemnity, termination, liability,
//!   payment, confidentiality, IP, non-compete, warranty, venue and dispute clauses
//! - Playbooks: extra rules loaded from JSON or TOML and appended after the built-ins
//! - Scoping by clause category, contract type and reviewing perspective
//! - Severity and description overrides per perspective
//! - Threshold-based aggregation into one contract severity
//!
//! # Examples
//!
//! ```
//! use clausewise_domain::{AnalysisContext, Classification, ClauseNode, EnrichedClause, EntitySet, Severity};
//! use clausewise_risk::RiskEngine;
//!
//! let engine = RiskEngine::builtin()?;
//! let clause = EnrichedClause::new(
//!     ClauseNode::new("1", "Indemnification", "Party shall indemnify and defend against any and all claims."),
//!     Classification::from_ranked(vec!["INDEMNITY".into()]),
//!     EntitySet::default(),
//! );
//!
//! let result = engine.analyze_clause(&clause, &AnalysisContext::none());
//! assert_eq!(result.risk_level, Severity::High);
//! # Ok::<(), clausewise_risk::RiskError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod playbook;
mod rule;
mod ruleset;

pub use config::AggregationPolicy;
pub use engine::{ClauseRiskResult, ContractRiskResult, MatchedRule, RiskEngine};
pub use error::RiskError;
pub use playbook::{load_playbook, parse_playbook, PlaybookFormat};
pub use rule::{RiskRule, RulePattern, UnlessFollowedBy};
pub use ruleset::RuleSet;
