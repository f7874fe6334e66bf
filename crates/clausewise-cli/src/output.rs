//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use clausewise_analyzer::ContractAnalysis;
use clausewise_classifier::CategoryScore;
use clausewise_domain::{AnalysisContext, Classification, ClauseNode, EnrichedClause, EntitySet, Severity};
use clausewise_risk::{ClauseRiskResult, MatchedRule, RuleSet};
use colored::*;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const TITLE_WIDTH: usize = 40;
const TEXT_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a full contract analysis.
    pub fn format_analysis(&self, analysis: &ContractAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&analysis_json(analysis))?),
            OutputFormat::Table => Ok(self.analysis_table(analysis)),
            OutputFormat::Quiet => Ok(analysis
                .risk
                .clause_results
                .iter()
                .map(|r| format!("{}\t{}", r.clause_id, r.risk_level))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a clause tree.
    pub fn format_clauses(&self, clauses: &[ClauseNode]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let nodes: Vec<Value> = clauses.iter().map(clause_json).collect();
                Ok(serde_json::to_string_pretty(&nodes)?)
            }
            OutputFormat::Table => {
                if clauses.is_empty() {
                    return Ok(self.colorize("No clauses found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Text"]);
                for clause in clauses {
                    push_clause_rows(&mut builder, clause, 0);
                }
                Ok(finish(builder))
            }
            OutputFormat::Quiet => {
                let mut ids = Vec::new();
                for clause in clauses {
                    collect_ids(clause, &mut ids);
                }
                Ok(ids.join("\n"))
            }
        }
    }

    /// Format the classification of one clause text.
    pub fn format_classification(
        &self,
        classification: &Classification,
        scores: &[CategoryScore],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "types": classification.types,
                    "primary_type": classification.primary_type,
                    "secondary_types": classification.secondary_types,
                    "scores": scores
                        .iter()
                        .map(|s| json!({ "category": s.category, "score": s.score }))
                        .collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut out = format!(
                    "Primary type: {}\n",
                    self.colorize(&classification.primary_type, "cyan")
                );
                if scores.is_empty() {
                    out.push_str(&self.info("No category pattern matched"));
                    return Ok(out);
                }
                let mut builder = Builder::default();
                builder.push_record(["Category", "Score"]);
                for score in scores {
                    builder.push_record([score.category.clone(), format!("{:.1}", score.score)]);
                }
                out.push_str(&finish(builder));
                Ok(out)
            }
            OutputFormat::Quiet => Ok(classification.types.join("\n")),
        }
    }

    /// Format a rule set.
    pub fn format_rules(&self, rules: &RuleSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value: Vec<Value> = rules
                    .iter()
                    .map(|rule| {
                        json!({
                            "rule_id": rule.rule_id,
                            "name": rule.name,
                            "risk_level": rule.risk_level.as_str(),
                            "clause_types": rule.clause_types,
                            "contract_types": rule.contract_types,
                            "perspectives": rule.perspectives,
                            "perspective_risk_levels": rule
                                .perspective_risk_levels
                                .iter()
                                .map(|(p, level)| (p.clone(), Value::from(level.as_str())))
                                .collect::<serde_json::Map<String, Value>>(),
                            "patterns": rule.patterns.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                            "description": rule.description,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Level", "Clause types", "Scope"]);
                for rule in rules {
                    builder.push_record([
                        rule.rule_id.clone(),
                        rule.name.clone(),
                        rule.risk_level.to_string(),
                        join_or(&rule.clause_types, "any"),
                        scope_label(&rule.contract_types, &rule.perspectives),
                    ]);
                }
                Ok(format!("{}\n{} rules", finish(builder), rules.len()))
            }
            OutputFormat::Quiet => Ok(rules
                .iter()
                .map(|r| r.rule_id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a severity with its conventional color.
    pub fn severity(&self, level: Option<Severity>) -> String {
        match level {
            Some(Severity::High) => self.colorize("HIGH", "red"),
            Some(Severity::Medium) => self.colorize("MEDIUM", "yellow"),
            Some(Severity::Low) => self.colorize("LOW", "green"),
            None => self.colorize("UNKNOWN", "magenta"),
        }
    }

    fn analysis_table(&self, analysis: &ContractAnalysis) -> String {
        if !analysis.is_success() {
            return [
                self.warning("Contract parsing failed. Manual review required."),
                "No clauses could be recovered; the file may be scanned without OCR or use an unusual layout.".to_string(),
            ]
            .join("\n");
        }

        let summary = &analysis.summary;
        let mut out = format!(
            "Overall risk: {}  ({} clauses, {} high, {} medium, {} issues){}\n",
            self.severity(analysis.overall_risk),
            summary.total_clauses,
            summary.high_risk_count,
            summary.medium_risk_count,
            summary.total_issues,
            context_label(&analysis.context),
        );

        let mut builder = Builder::default();
        builder.push_record(["Clause", "Title", "Types", "Risk", "Rules"]);
        for (clause, result) in analysis.clauses.iter().zip(&analysis.risk.clause_results) {
            builder.push_record([
                clause.id().to_string(),
                truncate(clause.title(), TITLE_WIDTH),
                clause.types().join(", "),
                result.risk_level.to_string(),
                result
                    .matched_rules
                    .iter()
                    .map(|m| m.rule_id.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ]);
        }
        out.push_str(&finish(builder));

        if !analysis.risk.all_flagged_rules.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Rule", "Clause", "Level", "Issue", "Recommendation"]);
            for result in &analysis.risk.clause_results {
                for rule in &result.matched_rules {
                    builder.push_record([
                        rule.rule_id.clone(),
                        result.clause_id.clone(),
                        rule.risk_level.to_string(),
                        truncate(&rule.description, TEXT_WIDTH),
                        truncate(&rule.recommendation, TEXT_WIDTH),
                    ]);
                }
            }
            out.push_str("\n\nFlagged issues:\n");
            out.push_str(&finish(builder));
        }

        out
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn finish(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn push_clause_rows(builder: &mut Builder, clause: &ClauseNode, depth: usize) {
    builder.push_record([
        format!("{}{}", "  ".repeat(depth), clause.id),
        truncate(&clause.title, TITLE_WIDTH),
        truncate(&clause.text, TEXT_WIDTH),
    ]);
    for child in &clause.children {
        push_clause_rows(builder, child, depth + 1);
    }
}

fn collect_ids(clause: &ClauseNode, ids: &mut Vec<String>) {
    ids.push(clause.id.to_string());
    for child in &clause.children {
        collect_ids(child, ids);
    }
}

/// Shorten text to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

fn join_or(values: &[String], empty: &str) -> String {
    if values.is_empty() {
        empty.to_string()
    } else {
        values.join(", ")
    }
}

fn scope_label(contract_types: &[String], perspectives: &[String]) -> String {
    match (contract_types.is_empty(), perspectives.is_empty()) {
        (true, true) => "all".to_string(),
        (false, true) => contract_types.join(", "),
        (true, false) => format!("as {}", perspectives.join("/")),
        (false, false) => format!("{} as {}", contract_types.join(", "), perspectives.join("/")),
    }
}

fn context_label(context: &AnalysisContext) -> String {
    match (&context.contract_type, &context.perspective) {
        (None, None) => String::new(),
        (Some(t), None) => format!(" [{}]", t),
        (None, Some(p)) => format!(" [as {}]", p),
        (Some(t), Some(p)) => format!(" [{}, as {}]", t, p),
    }
}

fn context_json(context: &AnalysisContext) -> Value {
    json!({
        "contract_type": context.contract_type,
        "perspective": context.perspective,
    })
}

fn entities_json(entities: &EntitySet) -> Value {
    json!({
        "money": entities.money,
        "dates": entities.dates,
        "durations": entities.durations,
        "parties": entities.parties,
        "locations": entities.locations,
    })
}

fn clause_json(clause: &ClauseNode) -> Value {
    json!({
        "id": clause.id.as_str(),
        "title": clause.title,
        "text": clause.text,
        "children": clause.children.iter().map(clause_json).collect::<Vec<_>>(),
    })
}

fn enriched_json(clause: &EnrichedClause) -> Value {
    let mut value = clause_json(&clause.clause);
    if let Value::Object(map) = &mut value {
        map.insert("types".into(), json!(clause.classification.types));
        map.insert("primary_type".into(), json!(clause.classification.primary_type));
        map.insert("secondary_types".into(), json!(clause.classification.secondary_types));
        map.insert("entities".into(), entities_json(&clause.entities));
    }
    value
}

fn matched_rule_json(rule: &MatchedRule) -> Value {
    json!({
        "rule_id": rule.rule_id,
        "name": rule.name,
        "risk_level": rule.risk_level.as_str(),
        "description": rule.description,
        "why_risky": rule.why_risky,
        "recommendation": rule.recommendation,
        "redline_suggestion": rule.redline_suggestion,
        "example_clauses": rule.example_clauses,
        "contract_scope": rule.contract_scope,
        "perspective_scope": rule.perspective_scope,
    })
}

fn clause_result_json(result: &ClauseRiskResult) -> Value {
    json!({
        "clause_id": result.clause_id,
        "clause_title": result.clause_title,
        "risk_level": result.risk_level.as_str(),
        "risk_count": result.risk_count,
        "matched_rules": result.matched_rules.iter().map(matched_rule_json).collect::<Vec<_>>(),
    })
}

/// JSON document for a contract analysis.
pub fn analysis_json(analysis: &ContractAnalysis) -> Value {
    let overall = analysis
        .overall_risk
        .map(|s| s.as_str())
        .unwrap_or("UNKNOWN");
    let risk = &analysis.risk;
    let summary = &analysis.summary;

    json!({
        "schema_version": "1.0",
        "status": analysis.status.as_str(),
        "context": context_json(&analysis.context),
        "clauses": analysis.clauses.iter().map(enriched_json).collect::<Vec<_>>(),
        "risk_analysis": {
            "overall_risk": overall,
            "total_clauses": risk.total_clauses,
            "high_risk_clauses": risk.high_risk_clauses,
            "medium_risk_clauses": risk.medium_risk_clauses,
            "low_risk_clauses": risk.low_risk_clauses,
            "clause_analyses": risk.clause_results.iter().map(clause_result_json).collect::<Vec<_>>(),
            "all_flagged_rules": risk.all_flagged_rules.iter().map(matched_rule_json).collect::<Vec<_>>(),
            "context": context_json(&risk.context),
        },
        "summary": {
            "total_clauses": summary.total_clauses,
            "clause_type_breakdown": summary.clause_type_breakdown,
            "contract_entities": entities_json(&summary.contract_entities),
            "risk_summary": {
                "overall_risk": overall,
                "high_risk_count": summary.high_risk_count,
                "medium_risk_count": summary.medium_risk_count,
                "total_issues": summary.total_issues,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_analyzer::ContractAnalyzer;

    const CONTRACT: &str = "1. Indemnification\nParty shall indemnify and defend against any and all claims.\n2. Termination\n2.1 At-Will\nEither party may terminate at any time for any reason.";

    fn analysis() -> ContractAnalysis {
        ContractAnalyzer::builtin()
            .unwrap()
            .analyze_text(CONTRACT, &AnalysisContext::none())
    }

    #[test]
    fn test_analysis_json_shape() {
        let value = analysis_json(&analysis());
        assert_eq!(value["status"], "SUCCESS");
        assert_eq!(value["risk_analysis"]["overall_risk"], "MEDIUM");
        assert_eq!(value["clauses"][0]["primary_type"], "INDEMNITY");
        assert_eq!(value["clauses"][1]["children"][0]["id"], "2.1");
        assert_eq!(value["summary"]["clause_type_breakdown"]["INDEMNITY"], 1);
        assert!(value["context"]["perspective"].is_null());
    }

    #[test]
    fn test_parse_failure_reports_unknown() {
        let failed = ContractAnalysis::parse_failed(AnalysisContext::none());
        let value = analysis_json(&failed);
        assert_eq!(value["status"], "PARSE_FAILED");
        assert_eq!(value["risk_analysis"]["overall_risk"], "UNKNOWN");

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_analysis(&failed).unwrap();
        assert!(output.contains("Manual review required"));
    }

    #[test]
    fn test_quiet_analysis() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_analysis(&analysis()).unwrap();
        assert_eq!(output, "1\tHIGH\n2\tHIGH");
    }

    #[test]
    fn test_table_analysis() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_analysis(&analysis()).unwrap();
        assert!(output.starts_with("Overall risk: MEDIUM"));
        assert!(output.contains("IND002"));
        assert!(output.contains("Flagged issues"));
    }

    #[test]
    fn test_clause_tree_quiet_lists_nested_ids() {
        let clauses = vec![ClauseNode::new("2", "Termination", "")
            .with_children(vec![ClauseNode::new("2.1", "At-Will", "x")])];
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_clauses(&clauses).unwrap(), "2\n2.1");
    }

    #[test]
    fn test_empty_clause_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(formatter.format_clauses(&[]).unwrap().contains("No clauses found"));
    }

    #[test]
    fn test_rules_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_rules(&RuleSet::builtin().unwrap()).unwrap();
        assert_eq!(output.lines().count(), 22);
        assert!(output.starts_with("IND001"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd…");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.severity(None), "UNKNOWN");
    }
}
