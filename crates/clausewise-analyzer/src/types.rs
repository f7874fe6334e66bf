//! Result types for a whole-contract analysis

use std::collections::BTreeMap;

use clausewise_domain::{AnalysisContext, EnrichedClause, EntitySet, Severity};
use clausewise_risk::ContractRiskResult;

/// Whether the contract could be broken into clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// At least one clause was found and analysed
    Success,
    /// No clause could be recovered; manual review is needed
    ParseFailed,
}

impl AnalysisStatus {
    /// Wire label ("SUCCESS" / "PARSE_FAILED")
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Success => "SUCCESS",
            AnalysisStatus::ParseFailed => "PARSE_FAILED",
        }
    }
}

/// Contract-level digest of an analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSummary {
    /// Number of analysed (top-level) clauses
    pub total_clauses: usize,

    /// Clause count per primary category
    pub clause_type_breakdown: BTreeMap<String, usize>,

    /// Union of every clause's entities, without repeats
    pub contract_entities: EntitySet,

    /// Clauses rated HIGH
    pub high_risk_count: usize,

    /// Clauses rated MEDIUM
    pub medium_risk_count: usize,

    /// Matched rules across the contract
    pub total_issues: usize,
}

impl AnalysisSummary {
    pub(crate) fn build(clauses: &[EnrichedClause], risk: &ContractRiskResult) -> Self {
        let mut summary = Self {
            total_clauses: clauses.len(),
            high_risk_count: risk.high_risk_clauses,
            medium_risk_count: risk.medium_risk_clauses,
            total_issues: risk.all_flagged_rules.len(),
            ..Default::default()
        };

        for clause in clauses {
            *summary
                .clause_type_breakdown
                .entry(clause.classification.primary_type.clone())
                .or_insert(0) += 1;
            summary.contract_entities.merge(&clause.entities);
        }

        summary
    }
}

/// Outcome of running the full pipeline over one contract
#[derive(Debug, Clone)]
pub struct ContractAnalysis {
    /// Parse outcome
    pub status: AnalysisStatus,

    /// Context the contract was evaluated under
    pub context: AnalysisContext,

    /// Classified top-level clauses, in document order
    pub clauses: Vec<EnrichedClause>,

    /// Per-clause and aggregate risk
    pub risk: ContractRiskResult,

    /// Contract severity; `None` when parsing failed
    pub overall_risk: Option<Severity>,

    /// Contract-level digest
    pub summary: AnalysisSummary,
}

impl ContractAnalysis {
    /// Analysis of a contract from which no clause could be recovered
    pub fn parse_failed(context: AnalysisContext) -> Self {
        Self {
            status: AnalysisStatus::ParseFailed,
            risk: ContractRiskResult::empty(context.clone()),
            context,
            clauses: Vec::new(),
            overall_risk: None,
            summary: AnalysisSummary::default(),
        }
    }

    /// Whether the contract was segmented and analysed
    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }

    /// Risk result for one clause id
    pub fn clause_risk(&self, clause_id: &str) -> Option<&clausewise_risk::ClauseRiskResult> {
        self.risk
            .clause_results
            .iter()
            .find(|r| r.clause_id == clause_id)
    }
}
