//! Playbook parsing
//!
//! A playbook is a document with a `rules` list. Each entry uses the keys
//! `ruleId`, `name`, `patterns`, `riskLevel`, `description`, `whyRisky` and
//! `recommendation` (required) plus `clauseTypes`, `redlineSuggestion`,
//! `exampleClauses`, `contractTypes`, `perspectives`, `perspectiveRiskLevels`
//! and `perspectiveDescriptions` (optional). A `patterns` entry is either a
//! string or `{"pattern": ..., "unlessFollowedBy": {"pattern": ..., "within": N}}`.

use std::path::Path;

use clausewise_domain::Severity;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{RiskError, RiskRule, RulePattern};

/// Playbook document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybookFormat {
    /// `{"rules": [...]}`
    Json,
    /// `[[rules]]` tables
    Toml,
}

impl PlaybookFormat {
    /// Format implied by a file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Read and parse a playbook file
pub fn load_playbook(path: &Path) -> Result<Vec<RiskRule>, RiskError> {
    let content = std::fs::read_to_string(path)?;
    let rules = parse_playbook(&content, PlaybookFormat::from_path(path))?;
    debug!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// Parse playbook text into compiled rules
///
/// Every entry is validated; the first malformed one aborts the load.
pub fn parse_playbook(content: &str, format: PlaybookFormat) -> Result<Vec<RiskRule>, RiskError> {
    let document: Value = match format {
        PlaybookFormat::Json => serde_json::from_str(content)
            .map_err(|e| RiskError::Parse(format!("JSON parse error: {}", e)))?,
        PlaybookFormat::Toml => toml::from_str(content)
            .map_err(|e| RiskError::Parse(format!("TOML parse error: {}", e)))?,
    };

    let root = document
        .as_object()
        .ok_or_else(|| RiskError::Parse("Expected a document with a 'rules' list".to_string()))?;

    let Some(rules) = root.get("rules") else {
        return Ok(Vec::new());
    };
    let rules = rules
        .as_array()
        .ok_or_else(|| RiskError::Parse("'rules' must be a list".to_string()))?;

    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| parse_rule(index, rule))
        .collect()
}

/// Parse a single rule entry
fn parse_rule(index: usize, json: &Value) -> Result<RiskRule, RiskError> {
    let obj = json.as_object().ok_or_else(|| RiskError::InvalidField {
        index,
        field: "rules".to_string(),
        reason: "entry is not an object".to_string(),
    })?;
    let fields = Fields { index, obj };

    let rule_id = fields.required_str("ruleId")?;
    let name = fields.required_str("name")?;
    let risk_level = fields.severity("riskLevel")?;
    let description = fields.required_str("description")?;
    let why_risky = fields.required_str("whyRisky")?;
    let recommendation = fields.required_str("recommendation")?;

    let raw_patterns = fields.required("patterns")?;
    let patterns = parse_patterns(index, &rule_id, raw_patterns)?;

    let mut rule = RiskRule::new(rule_id, name, patterns, risk_level, description)
        .with_guidance(why_risky, recommendation, fields.optional_str("redlineSuggestion")?)
        .with_clause_types(&fields.string_list("clauseTypes")?)
        .with_contract_types(&fields.string_list("contractTypes")?)
        .with_perspectives(&fields.string_list("perspectives")?);
    rule.example_clauses = fields.string_list("exampleClauses")?;

    for (perspective, level) in fields.string_map("perspectiveRiskLevels")? {
        let level = Severity::parse(&level).ok_or_else(|| RiskError::InvalidField {
            index,
            field: "perspectiveRiskLevels".to_string(),
            reason: format!("unknown risk level '{}' for perspective '{}'", level, perspective),
        })?;
        rule = rule.with_perspective_level(&perspective, level);
    }
    for (perspective, description) in fields.string_map("perspectiveDescriptions")? {
        rule = rule.with_perspective_description(&perspective, description);
    }

    Ok(rule)
}

fn parse_patterns(index: usize, rule_id: &str, value: &Value) -> Result<Vec<RulePattern>, RiskError> {
    let invalid = |reason: String| RiskError::InvalidField {
        index,
        field: "patterns".to_string(),
        reason,
    };

    let entries = value
        .as_array()
        .ok_or_else(|| invalid("expected a list".to_string()))?;
    if entries.is_empty() {
        return Err(invalid("at least one pattern is required".to_string()));
    }

    entries
        .iter()
        .map(|entry| match entry {
            Value::String(pattern) => RulePattern::new(rule_id, pattern),
            Value::Object(obj) => {
                let pattern = obj
                    .get("pattern")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("pattern object needs a 'pattern' string".to_string()))?;
                let compiled = RulePattern::new(rule_id, pattern)?;
                match obj.get("unlessFollowedBy") {
                    None => Ok(compiled),
                    Some(guard) => {
                        let guard_pattern = guard
                            .get("pattern")
                            .and_then(Value::as_str)
                            .ok_or_else(|| invalid("'unlessFollowedBy' needs a 'pattern' string".to_string()))?;
                        let within = guard
                            .get("within")
                            .and_then(Value::as_u64)
                            .ok_or_else(|| invalid("'unlessFollowedBy' needs a non-negative 'within'".to_string()))?;
                        compiled.unless_followed_by(rule_id, guard_pattern, within as usize)
                    }
                }
            }
            other => Err(invalid(format!("unsupported pattern entry: {}", other))),
        })
        .collect()
}

/// Field accessors for one rule entry, reporting errors by rule index
struct Fields<'a> {
    index: usize,
    obj: &'a Map<String, Value>,
}

impl Fields<'_> {
    fn missing(&self, field: &str) -> RiskError {
        RiskError::MissingField {
            index: self.index,
            field: field.to_string(),
        }
    }

    fn invalid(&self, field: &str, reason: &str) -> RiskError {
        RiskError::InvalidField {
            index: self.index,
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Present and not null
    fn get(&self, field: &str) -> Option<&Value> {
        self.obj.get(field).filter(|v| !v.is_null())
    }

    fn required(&self, field: &str) -> Result<&Value, RiskError> {
        self.get(field).ok_or_else(|| self.missing(field))
    }

    fn required_str(&self, field: &str) -> Result<String, RiskError> {
        let value = self
            .required(field)?
            .as_str()
            .ok_or_else(|| self.invalid(field, "expected a string"))?;
        if value.trim().is_empty() {
            return Err(self.invalid(field, "must not be empty"));
        }
        Ok(value.to_string())
    }

    fn optional_str(&self, field: &str) -> Result<Option<String>, RiskError> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.invalid(field, "expected a string")),
        }
    }

    fn severity(&self, field: &str) -> Result<Severity, RiskError> {
        let raw = self
            .required(field)?
            .as_str()
            .ok_or_else(|| self.invalid(field, "expected a string"))?;
        Severity::parse(raw)
            .ok_or_else(|| self.invalid(field, &format!("unknown risk level '{}'", raw)))
    }

    fn string_list(&self, field: &str) -> Result<Vec<String>, RiskError> {
        let Some(value) = self.get(field) else {
            return Ok(Vec::new());
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.invalid(field, "expected a list of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(field, "expected a list of strings"))
            })
            .collect()
    }

    fn string_map(&self, field: &str) -> Result<Vec<(String, String)>, RiskError> {
        let Some(value) = self.get(field) else {
            return Ok(Vec::new());
        };
        let map = value
            .as_object()
            .ok_or_else(|| self.invalid(field, "expected a table of strings"))?;
        map.iter()
            .map(|(key, value)| {
                value
                    .as_str()
                    .map(|v| (key.clone(), v.to_string()))
                    .ok_or_else(|| self.invalid(field, "expected a table of strings"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::AnalysisContext;

    const VALID: &str = r#"{
        "rules": [
            {
                "ruleId": "CUST001",
                "name": "Liquidated Damages",
                "clauseTypes": ["LIABILITY"],
                "patterns": ["\\bliquidated\\s+damages\\b"],
                "riskLevel": "high",
                "description": "Fixed damages owed on breach",
                "whyRisky": "Payable regardless of actual loss.",
                "recommendation": "Tie damages to actual loss.",
                "contractTypes": ["Services"],
                "perspectiveRiskLevels": {"Vendor": "HIGH", "client": "LOW"},
                "perspectiveDescriptions": {"vendor": "You pay on any slip."}
            }
        ]
    }"#;

    fn without(field: &str) -> String {
        let mut doc: Value = serde_json::from_str(VALID).unwrap();
        doc["rules"][0].as_object_mut().unwrap().remove(field);
        doc.to_string()
    }

    #[test]
    fn test_parse_valid_json() {
        let rules = parse_playbook(VALID, PlaybookFormat::Json).unwrap();
        assert_eq!(rules.len(), 1);

        let rule = &rules[0];
        assert_eq!(rule.rule_id, "CUST001");
        assert_eq!(rule.risk_level, Severity::High);
        assert_eq!(rule.contract_types, vec!["services".to_string()]);
        assert_eq!(rule.risk_level_for(Some("vendor")), Severity::High);
        assert_eq!(rule.risk_level_for(Some("client")), Severity::Low);
        assert_eq!(rule.description_for(Some("vendor")), "You pay on any slip.");
        assert!(rule.redline_suggestion.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [[rules]]
            ruleId = "CUST002"
            name = "Audit Rights"
            patterns = ['\baudit\b']
            riskLevel = "MEDIUM"
            description = "Counterparty may audit"
            whyRisky = "Disruptive."
            recommendation = "Limit frequency."
            redlineSuggestion = "Once per year."
        "#;
        let rules = parse_playbook(toml, PlaybookFormat::Toml).unwrap();
        assert_eq!(rules[0].redline_suggestion.as_deref(), Some("Once per year."));
        assert!(rules[0].matches("Customer may AUDIT records", &[], &AnalysisContext::none()));
    }

    #[test]
    fn test_missing_field_is_named() {
        for field in ["ruleId", "name", "patterns", "riskLevel", "description", "whyRisky", "recommendation"] {
            let err = parse_playbook(&without(field), PlaybookFormat::Json).unwrap_err();
            match err {
                RiskError::MissingField { index, field: missing } => {
                    assert_eq!(index, 0);
                    assert_eq!(missing, field);
                }
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        for field in ["clauseTypes", "contractTypes", "perspectiveRiskLevels", "perspectiveDescriptions"] {
            assert!(parse_playbook(&without(field), PlaybookFormat::Json).is_ok());
        }
    }

    #[test]
    fn test_unknown_risk_level() {
        let doc = VALID.replace("\"riskLevel\": \"high\"", "\"riskLevel\": \"CRITICAL\"");
        let err = parse_playbook(&doc, PlaybookFormat::Json).unwrap_err();
        assert!(matches!(err, RiskError::InvalidField { ref field, .. } if field == "riskLevel"));
    }

    #[test]
    fn test_unknown_perspective_level() {
        let doc = VALID.replace("\"client\": \"LOW\"", "\"client\": \"SEVERE\"");
        let err = parse_playbook(&doc, PlaybookFormat::Json).unwrap_err();
        assert!(err.to_string().contains("SEVERE"));
    }

    #[test]
    fn test_invalid_regex() {
        let doc = VALID.replace(r"\\bliquidated\\s+damages\\b", "(unclosed");
        let err = parse_playbook(&doc, PlaybookFormat::Json).unwrap_err();
        assert!(matches!(err, RiskError::Pattern { ref rule_id, .. } if rule_id == "CUST001"));
    }

    #[test]
    fn test_empty_patterns() {
        let doc = VALID.replace(r#"["\\bliquidated\\s+damages\\b"]"#, "[]");
        let err = parse_playbook(&doc, PlaybookFormat::Json).unwrap_err();
        assert!(matches!(err, RiskError::InvalidField { ref field, .. } if field == "patterns"));
    }

    #[test]
    fn test_blank_required_string() {
        let doc = VALID.replace("\"Payable regardless of actual loss.\"", "\"  \"");
        let err = parse_playbook(&doc, PlaybookFormat::Json).unwrap_err();
        assert!(matches!(err, RiskError::InvalidField { ref field, .. } if field == "whyRisky"));
    }

    #[test]
    fn test_guarded_pattern_entry() {
        let doc = r#"{"rules": [{
            "ruleId": "G1", "name": "Guarded", "riskLevel": "LOW",
            "description": "d", "whyRisky": "w", "recommendation": "r",
            "patterns": [{"pattern": "\\bfee\\b", "unlessFollowedBy": {"pattern": "\\bwaived\\b", "within": 10}}]
        }]}"#;
        let rules = parse_playbook(doc, PlaybookFormat::Json).unwrap();
        let guard = rules[0].patterns[0].guard().unwrap();
        assert_eq!(guard.within(), 10);
        assert!(!rules[0].matches("the fee is waived", &[], &AnalysisContext::none()));
        assert!(rules[0].matches("the fee is due", &[], &AnalysisContext::none()));
    }

    #[test]
    fn test_guard_without_within_rejected() {
        let doc = r#"{"rules": [{
            "ruleId": "G1", "name": "Guarded", "riskLevel": "LOW",
            "description": "d", "whyRisky": "w", "recommendation": "r",
            "patterns": [{"pattern": "fee", "unlessFollowedBy": {"pattern": "waived"}}]
        }]}"#;
        assert!(parse_playbook(doc, PlaybookFormat::Json).is_err());
    }

    #[test]
    fn test_missing_rules_list_is_empty() {
        assert!(parse_playbook("{}", PlaybookFormat::Json).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(parse_playbook("not json", PlaybookFormat::Json), Err(RiskError::Parse(_))));
        assert!(matches!(parse_playbook("[1, 2]", PlaybookFormat::Json), Err(RiskError::Parse(_))));
        assert!(matches!(parse_playbook(r#"{"rules": 3}"#, PlaybookFormat::Json), Err(RiskError::Parse(_))));
    }

    #[test]
    fn test_second_entry_error_reports_index() {
        let doc = r#"{"rules": [
            {"ruleId": "A1", "name": "a", "patterns": ["a"], "riskLevel": "LOW", "description": "d", "whyRisky": "w", "recommendation": "r"},
            {"ruleId": "A2", "name": "b", "patterns": ["b"], "riskLevel": "LOW", "description": "d", "recommendation": "r"}
        ]}"#;
        let err = parse_playbook(doc, PlaybookFormat::Json).unwrap_err();
        assert!(matches!(err, RiskError::MissingField { index: 1, ref field } if field == "whyRisky"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(PlaybookFormat::from_path(Path::new("rules.TOML")), PlaybookFormat::Toml);
        assert_eq!(PlaybookFormat::from_path(Path::new("rules.json")), PlaybookFormat::Json);
        assert_eq!(PlaybookFormat::from_path(Path::new("rules")), PlaybookFormat::Json);
    }
}
