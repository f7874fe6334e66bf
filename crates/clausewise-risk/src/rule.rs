//! Risk rules and their patterns

use std::collections::BTreeMap;

use clausewise_domain::{AnalysisContext, Severity};
use regex::{Regex, RegexBuilder};

use crate::RiskError;

/// Discards a pattern occurrence that is followed closely by another pattern
///
/// Expresses "X not followed within N characters by Y" without look-around.
#[derive(Debug, Clone)]
pub struct UnlessFollowedBy {
    pattern: Regex,
    within: usize,
}

impl UnlessFollowedBy {
    /// Guard source text
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Maximum distance, in characters, between the occurrence and the guard
    pub fn within(&self) -> usize {
        self.within
    }

    /// Whether the guard starts within range of byte offset `end` in `text`
    fn blocks(&self, text: &str, end: usize) -> bool {
        match self.pattern.find_at(text, end) {
            Some(m) => text[end..m.start()].chars().count() <= self.within,
            None => false,
        }
    }
}

/// One case-insensitive rule pattern, optionally guarded
#[derive(Debug, Clone)]
pub struct RulePattern {
    regex: Regex,
    guard: Option<UnlessFollowedBy>,
}

impl RulePattern {
    /// Compile an unguarded pattern
    pub fn new(rule_id: &str, pattern: &str) -> Result<Self, RiskError> {
        Ok(Self {
            regex: compile(rule_id, pattern)?,
            guard: None,
        })
    }

    /// Attach an unless-followed-by guard
    pub fn unless_followed_by(
        mut self,
        rule_id: &str,
        pattern: &str,
        within: usize,
    ) -> Result<Self, RiskError> {
        self.guard = Some(UnlessFollowedBy {
            pattern: compile(rule_id, pattern)?,
            within,
        });
        Ok(self)
    }

    /// Pattern source text
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The guard, if any
    pub fn guard(&self) -> Option<&UnlessFollowedBy> {
        self.guard.as_ref()
    }

    /// Whether some occurrence of the pattern survives the guard
    pub fn is_match(&self, text: &str) -> bool {
        match &self.guard {
            None => self.regex.is_match(text),
            Some(guard) => self
                .regex
                .find_iter(text)
                .any(|m| !guard.blocks(text, m.end())),
        }
    }
}

fn compile(rule_id: &str, pattern: &str) -> Result<Regex, RiskError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RiskError::Pattern {
            rule_id: rule_id.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// A risk detection rule
///
/// Scoping lists are normalised at construction: clause types uppercase,
/// contract types and perspectives lowercase.
#[derive(Debug, Clone)]
pub struct RiskRule {
    /// Unique rule identifier ("IND001")
    pub rule_id: String,
    /// Short human name
    pub name: String,
    /// Categories the rule applies to; empty means every category
    pub clause_types: Vec<String>,
    /// Patterns; the rule fires if any matches
    pub patterns: Vec<RulePattern>,
    /// Default severity
    pub risk_level: Severity,
    /// Default description
    pub description: String,
    /// Why the clause is risky
    pub why_risky: String,
    /// What to negotiate instead
    pub recommendation: String,
    /// Suggested replacement wording
    pub redline_suggestion: Option<String>,
    /// Sample clause texts the rule targets
    pub example_clauses: Vec<String>,
    /// Contract types the rule is limited to; empty means all
    pub contract_types: Vec<String>,
    /// Perspectives the rule is limited to; empty means all
    pub perspectives: Vec<String>,
    /// Severity overrides by perspective
    pub perspective_risk_levels: BTreeMap<String, Severity>,
    /// Description overrides by perspective
    pub perspective_descriptions: BTreeMap<String, String>,
}

impl RiskRule {
    /// Create a rule applying to every clause type and context
    pub fn new(
        rule_id: impl Into<String>,
        name: impl Into<String>,
        patterns: Vec<RulePattern>,
        risk_level: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            name: name.into(),
            clause_types: Vec::new(),
            patterns,
            risk_level,
            description: description.into(),
            why_risky: String::new(),
            recommendation: String::new(),
            redline_suggestion: None,
            example_clauses: Vec::new(),
            contract_types: Vec::new(),
            perspectives: Vec::new(),
            perspective_risk_levels: BTreeMap::new(),
            perspective_descriptions: BTreeMap::new(),
        }
    }

    /// Limit the rule to these clause categories
    pub fn with_clause_types<S: AsRef<str>>(mut self, types: &[S]) -> Self {
        self.clause_types = types.iter().map(|t| t.as_ref().trim().to_uppercase()).collect();
        self
    }

    /// Limit the rule to these contract types
    pub fn with_contract_types<S: AsRef<str>>(mut self, types: &[S]) -> Self {
        self.contract_types = lowercase_all(types);
        self
    }

    /// Limit the rule to these perspectives
    pub fn with_perspectives<S: AsRef<str>>(mut self, perspectives: &[S]) -> Self {
        self.perspectives = lowercase_all(perspectives);
        self
    }

    /// Override the severity for one perspective
    pub fn with_perspective_level(mut self, perspective: &str, level: Severity) -> Self {
        self.perspective_risk_levels
            .insert(perspective.trim().to_lowercase(), level);
        self
    }

    /// Override the description for one perspective
    pub fn with_perspective_description(
        mut self,
        perspective: &str,
        description: impl Into<String>,
    ) -> Self {
        self.perspective_descriptions
            .insert(perspective.trim().to_lowercase(), description.into());
        self
    }

    /// Set the explanatory texts
    pub fn with_guidance(
        mut self,
        why_risky: impl Into<String>,
        recommendation: impl Into<String>,
        redline_suggestion: Option<String>,
    ) -> Self {
        self.why_risky = why_risky.into();
        self.recommendation = recommendation.into();
        self.redline_suggestion = redline_suggestion;
        self
    }

    /// Whether the rule's scopes admit a clause with these categories in this context
    ///
    /// A scoped rule never applies when the context value it scopes on is absent.
    pub fn in_scope(&self, clause_types: &[String], context: &AnalysisContext) -> bool {
        if !self.clause_types.is_empty()
            && !self.clause_types.iter().any(|t| clause_types.contains(t))
        {
            return false;
        }
        if !scope_admits(&self.contract_types, context.contract_type.as_deref()) {
            return false;
        }
        scope_admits(&self.perspectives, context.perspective.as_deref())
    }

    /// Whether the rule fires on `text` for a clause with these categories
    pub fn matches(&self, text: &str, clause_types: &[String], context: &AnalysisContext) -> bool {
        self.in_scope(clause_types, context) && self.patterns.iter().any(|p| p.is_match(text))
    }

    /// Severity under a perspective, falling back to the default
    pub fn risk_level_for(&self, perspective: Option<&str>) -> Severity {
        perspective
            .and_then(|p| self.perspective_risk_levels.get(&p.to_lowercase()))
            .copied()
            .unwrap_or(self.risk_level)
    }

    /// Description under a perspective, falling back to the default
    pub fn description_for(&self, perspective: Option<&str>) -> &str {
        perspective
            .and_then(|p| self.perspective_descriptions.get(&p.to_lowercase()))
            .map(String::as_str)
            .unwrap_or(&self.description)
    }
}

fn scope_admits(scope: &[String], value: Option<&str>) -> bool {
    if scope.is_empty() {
        return true;
    }
    match value {
        Some(value) => scope.iter().any(|s| s.eq_ignore_ascii_case(value)),
        None => false,
    }
}

fn lowercase_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().trim().to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn pattern(p: &str) -> RulePattern {
        RulePattern::new("TEST", p).unwrap()
    }

    fn employment_rule() -> RiskRule {
        RiskRule::new(
            "TEST001",
            "Test",
            vec![pattern(r"\bterminate\b")],
            Severity::Medium,
            "default",
        )
        .with_clause_types(&["termination"])
        .with_contract_types(&["Employment"])
        .with_perspective_level("Employee", Severity::High)
        .with_perspective_level("employer", Severity::Low)
        .with_perspective_description("employee", "bad for you")
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        assert!(pattern(r"\bhold\s+harmless\b").is_match("shall HOLD Harmless the Company"));
    }

    #[test]
    fn test_guard_blocks_nearby_follower() {
        let p = pattern(r"\bconfidential\b")
            .unless_followed_by("TEST", r"\b\d+\s*(?:year|month)s?\b", 20)
            .unwrap();
        assert!(!p.is_match("kept confidential for 3 years"));
        assert!(p.is_match("kept confidential forever"));
    }

    #[test]
    fn test_guard_respects_distance() {
        let p = pattern(r"\bdispute\b")
            .unless_followed_by("TEST", r"\barbitration\b", 10)
            .unwrap();
        assert!(!p.is_match("any dispute goes to arbitration"));
        assert!(p.is_match("any dispute shall be resolved by binding arbitration"));
    }

    #[test]
    fn test_guard_checks_every_occurrence() {
        let p = pattern(r"\bdispute\b")
            .unless_followed_by("TEST", r"\bmediation\b", 15)
            .unwrap();
        // first occurrence is guarded, second is not
        assert!(p.is_match("a dispute → mediation. Any later dispute is litigated."));
    }

    #[test]
    fn test_invalid_pattern_names_rule() {
        let err = RulePattern::new("BAD001", "(unclosed").unwrap_err();
        assert!(matches!(err, RiskError::Pattern { ref rule_id, .. } if rule_id == "BAD001"));
    }

    #[test]
    fn test_clause_type_scope() {
        let rule = employment_rule();
        let ctx = AnalysisContext::new(Some("employment"), None::<&str>);
        assert!(rule.matches("may terminate", &types(&["TERMINATION"]), &ctx));
        assert!(!rule.matches("may terminate", &types(&["PAYMENT"]), &ctx));
    }

    #[test]
    fn test_contract_type_scope() {
        let rule = employment_rule();
        let clause = types(&["TERMINATION"]);
        assert!(!rule.matches("may terminate", &clause, &AnalysisContext::new(Some("nda"), None::<&str>)));
        assert!(!rule.matches("may terminate", &clause, &AnalysisContext::none()));
        assert!(rule.matches("may terminate", &clause, &AnalysisContext::new(Some("EMPLOYMENT"), None::<&str>)));
    }

    #[test]
    fn test_perspective_scope() {
        let rule = RiskRule::new("P1", "P", vec![pattern("x")], Severity::Low, "d")
            .with_perspectives(&["Vendor"]);
        assert!(rule.matches("x", &[], &AnalysisContext::new(None::<&str>, Some("vendor"))));
        assert!(!rule.matches("x", &[], &AnalysisContext::new(None::<&str>, Some("client"))));
        assert!(!rule.matches("x", &[], &AnalysisContext::none()));
    }

    #[test]
    fn test_unscoped_rule_applies_everywhere() {
        let rule = RiskRule::new("U1", "U", vec![pattern("x")], Severity::Low, "d");
        assert!(rule.in_scope(&types(&["GENERAL"]), &AnalysisContext::none()));
    }

    #[test]
    fn test_perspective_resolution() {
        let rule = employment_rule();
        assert_eq!(rule.risk_level_for(Some("employee")), Severity::High);
        assert_eq!(rule.risk_level_for(Some("EMPLOYER")), Severity::Low);
        assert_eq!(rule.risk_level_for(Some("vendor")), Severity::Medium);
        assert_eq!(rule.risk_level_for(None), Severity::Medium);

        assert_eq!(rule.description_for(Some("employee")), "bad for you");
        assert_eq!(rule.description_for(Some("employer")), "default");
    }
}
