//! Rule evaluation over enriched clauses

use clausewise_domain::{AnalysisContext, EnrichedClause, Severity};
use tracing::debug;

use crate::{AggregationPolicy, RiskError, RiskRule, RuleSet};

/// A rule that fired, resolved for the active perspective
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRule {
    /// Rule identifier
    pub rule_id: String,
    /// Rule name
    pub name: String,
    /// Perspective-resolved severity
    pub risk_level: Severity,
    /// Perspective-resolved description
    pub description: String,
    /// Why the clause is risky
    pub why_risky: String,
    /// What to negotiate instead
    pub recommendation: String,
    /// Suggested replacement wording
    pub redline_suggestion: Option<String>,
    /// Sample clauses the rule targets
    pub example_clauses: Vec<String>,
    /// Contract types the rule is limited to
    pub contract_scope: Vec<String>,
    /// Perspectives the rule is limited to
    pub perspective_scope: Vec<String>,
}

impl MatchedRule {
    fn resolve(rule: &RiskRule, perspective: Option<&str>) -> Self {
        Self {
            rule_id: rule.rule_id.clone(),
            name: rule.name.clone(),
            risk_level: rule.risk_level_for(perspective),
            description: rule.description_for(perspective).to_string(),
            why_risky: rule.why_risky.clone(),
            recommendation: rule.recommendation.clone(),
            redline_suggestion: rule.redline_suggestion.clone(),
            example_clauses: rule.example_clauses.clone(),
            contract_scope: rule.contract_types.clone(),
            perspective_scope: rule.perspectives.clone(),
        }
    }
}

/// Risk verdict for one clause
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseRiskResult {
    /// Clause id
    pub clause_id: String,
    /// Clause title
    pub clause_title: String,
    /// Highest severity among matched rules; LOW when nothing matched
    pub risk_level: Severity,
    /// Matched rules in rule-set order
    pub matched_rules: Vec<MatchedRule>,
    /// Number of matched rules
    pub risk_count: usize,
}

/// Risk verdict for a whole contract
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRiskResult {
    /// Aggregated contract severity
    pub overall_risk: Severity,
    /// Number of clauses evaluated
    pub total_clauses: usize,
    /// Clauses whose severity is HIGH
    pub high_risk_clauses: usize,
    /// Clauses whose severity is MEDIUM
    pub medium_risk_clauses: usize,
    /// Clauses whose severity is LOW
    pub low_risk_clauses: usize,
    /// Per-clause verdicts in input order
    pub clause_results: Vec<ClauseRiskResult>,
    /// Every matched rule, flattened in clause order
    pub all_flagged_rules: Vec<MatchedRule>,
    /// Context the contract was evaluated under
    pub context: AnalysisContext,
}

impl ContractRiskResult {
    /// Result for a contract with no clauses
    pub fn empty(context: AnalysisContext) -> Self {
        Self {
            overall_risk: Severity::Low,
            total_clauses: 0,
            high_risk_clauses: 0,
            medium_risk_clauses: 0,
            low_risk_clauses: 0,
            clause_results: Vec::new(),
            all_flagged_rules: Vec::new(),
            context,
        }
    }
}

/// Evaluates clauses against a rule set
///
/// Holds no mutable state; one engine can serve any number of analyses.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    rules: RuleSet,
    policy: AggregationPolicy,
}

impl RiskEngine {
    /// Create an engine from a rule set and aggregation policy
    pub fn new(rules: RuleSet, policy: AggregationPolicy) -> Result<Self, RiskError> {
        policy.validate()?;
        Ok(Self { rules, policy })
    }

    /// Engine over the built-in rules with the default policy
    pub fn builtin() -> Result<Self, RiskError> {
        Self::new(RuleSet::builtin()?, AggregationPolicy::default())
    }

    /// Get the rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Get the aggregation policy
    pub fn policy(&self) -> &AggregationPolicy {
        &self.policy
    }

    /// Evaluate one clause
    ///
    /// Rules see the clause body together with its sub-clauses.
    pub fn analyze_clause(&self, clause: &EnrichedClause, context: &AnalysisContext) -> ClauseRiskResult {
        let text = clause.analysis_text();
        let perspective = context.perspective.as_deref();

        let matched_rules: Vec<MatchedRule> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(&text, clause.types(), context))
            .map(|rule| MatchedRule::resolve(rule, perspective))
            .collect();

        let risk_level = Severity::max_of(matched_rules.iter().map(|m| m.risk_level));
        if !matched_rules.is_empty() {
            debug!(
                "Clause {} matched {} rules, severity {}",
                clause.id(),
                matched_rules.len(),
                risk_level
            );
        }

        ClauseRiskResult {
            clause_id: clause.id().to_string(),
            clause_title: clause.title().to_string(),
            risk_level,
            risk_count: matched_rules.len(),
            matched_rules,
        }
    }

    /// Evaluate every clause and aggregate a contract severity
    pub fn analyze(&self, clauses: &[EnrichedClause], context: &AnalysisContext) -> ContractRiskResult {
        let mut result = ContractRiskResult::empty(context.clone());

        for clause in clauses {
            let clause_result = self.analyze_clause(clause, context);
            match clause_result.risk_level {
                Severity::High => result.high_risk_clauses += 1,
                Severity::Medium => result.medium_risk_clauses += 1,
                Severity::Low => result.low_risk_clauses += 1,
            }
            result
                .all_flagged_rules
                .extend(clause_result.matched_rules.iter().cloned());
            result.clause_results.push(clause_result);
        }

        result.total_clauses = clauses.len();
        result.overall_risk = self
            .policy
            .aggregate(result.high_risk_clauses, result.medium_risk_clauses);
        result
    }
}
