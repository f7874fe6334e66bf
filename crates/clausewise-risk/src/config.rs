//! Contract-level aggregation policy

use clausewise_domain::Severity;
use serde::{Deserialize, Serialize};

use crate::RiskError;

/// Thresholds that turn per-clause severities into one contract severity
///
/// Threshold based rather than statistical, so a reviewer can predict the
/// verdict from the clause counts alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationPolicy {
    /// HIGH clauses needed for a HIGH contract
    pub high_clauses_for_high: usize,

    /// HIGH clauses needed for a MEDIUM contract
    pub high_clauses_for_medium: usize,

    /// MEDIUM clauses needed for a MEDIUM contract
    pub medium_clauses_for_medium: usize,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            high_clauses_for_high: 3,
            high_clauses_for_medium: 1,
            medium_clauses_for_medium: 5,
        }
    }
}

impl AggregationPolicy {
    /// Escalate sooner
    pub fn strict() -> Self {
        Self {
            high_clauses_for_high: 2,
            high_clauses_for_medium: 1,
            medium_clauses_for_medium: 3,
        }
    }

    /// Escalate later
    pub fn lenient() -> Self {
        Self {
            high_clauses_for_high: 5,
            high_clauses_for_medium: 2,
            medium_clauses_for_medium: 8,
        }
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.high_clauses_for_high == 0
            || self.high_clauses_for_medium == 0
            || self.medium_clauses_for_medium == 0
        {
            return Err(RiskError::Config(
                "aggregation thresholds must be greater than 0".to_string(),
            ));
        }
        if self.high_clauses_for_medium > self.high_clauses_for_high {
            return Err(RiskError::Config(format!(
                "high_clauses_for_medium ({}) cannot exceed high_clauses_for_high ({})",
                self.high_clauses_for_medium, self.high_clauses_for_high
            )));
        }
        Ok(())
    }

    /// Contract severity for the given clause counts
    pub fn aggregate(&self, high: usize, medium: usize) -> Severity {
        if high >= self.high_clauses_for_high {
            Severity::High
        } else if high >= self.high_clauses_for_medium || medium >= self.medium_clauses_for_medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Load a policy from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, RiskError> {
        let policy: Self = toml::from_str(toml_str)
            .map_err(|e| RiskError::Config(format!("Failed to parse TOML: {}", e)))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Serialize the policy to TOML string
    pub fn to_toml(&self) -> Result<String, RiskError> {
        toml::to_string_pretty(self)
            .map_err(|e| RiskError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = AggregationPolicy::default();
        assert_eq!(policy.aggregate(3, 0), Severity::High);
        assert_eq!(policy.aggregate(1, 4), Severity::Medium);
        assert_eq!(policy.aggregate(0, 4), Severity::Low);
        assert_eq!(policy.aggregate(0, 5), Severity::Medium);
        assert_eq!(policy.aggregate(2, 10), Severity::Medium);
        assert_eq!(policy.aggregate(0, 0), Severity::Low);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(AggregationPolicy::default().validate().is_ok());
        assert!(AggregationPolicy::strict().validate().is_ok());
        assert!(AggregationPolicy::lenient().validate().is_ok());
    }

    #[test]
    fn test_strict_escalates_sooner() {
        assert_eq!(AggregationPolicy::strict().aggregate(2, 0), Severity::High);
        assert_eq!(AggregationPolicy::default().aggregate(2, 0), Severity::Medium);
    }

    #[test]
    fn test_invalid_policy() {
        let policy = AggregationPolicy {
            high_clauses_for_medium: 4,
            ..Default::default()
        };
        assert!(matches!(policy.validate(), Err(RiskError::Config(_))));

        let zero = AggregationPolicy {
            medium_clauses_for_medium: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let policy = AggregationPolicy::from_toml("high_clauses_for_high = 4").unwrap();
        assert_eq!(policy.high_clauses_for_high, 4);
        assert_eq!(policy.medium_clauses_for_medium, 5);
        assert_eq!(AggregationPolicy::from_toml(&policy.to_toml().unwrap()).unwrap(), policy);
    }
}
