//! The contract analysis pipeline

use std::path::Path;

use clausewise_classifier::ClauseClassifier;
use clausewise_domain::{AnalysisContext, ClauseNode, EnrichedClause, EntityExtractor, NoEntities};
use clausewise_risk::{RiskEngine, RuleSet};
use clausewise_segmenter::ClauseTreeBuilder;
use tracing::{debug, warn};

use crate::error::AnalyzerError;
use crate::types::{AnalysisStatus, AnalysisSummary, ContractAnalysis};

/// Runs segmentation, classification, entity enrichment and risk evaluation
///
/// The stages only exchange domain values, so each can be swapped for a
/// differently configured instance. Analysis takes `&self`; one analyzer can
/// serve several threads at once.
pub struct ContractAnalyzer {
    builder: ClauseTreeBuilder,
    classifier: ClauseClassifier,
    engine: RiskEngine,
    extractor: Box<dyn EntityExtractor>,
}

impl ContractAnalyzer {
    /// Compose an analyzer from configured stages
    pub fn new(builder: ClauseTreeBuilder, classifier: ClauseClassifier, engine: RiskEngine) -> Self {
        Self {
            builder,
            classifier,
            engine,
            extractor: Box::new(NoEntities),
        }
    }

    /// Analyzer with default stages and the built-in rules
    pub fn builtin() -> Result<Self, AnalyzerError> {
        Ok(Self::new(
            ClauseTreeBuilder::default_config()?,
            ClauseClassifier::builtin()?,
            RiskEngine::builtin()?,
        ))
    }

    /// Analyzer with default stages, the built-in rules and a playbook
    pub fn with_playbook(path: &Path) -> Result<Self, AnalyzerError> {
        let engine = RiskEngine::new(RuleSet::with_playbook(path)?, Default::default())?;
        Ok(Self::new(
            ClauseTreeBuilder::default_config()?,
            ClauseClassifier::builtin()?,
            engine,
        ))
    }

    /// Use an entity extractor for clause enrichment
    pub fn with_extractor(mut self, extractor: Box<dyn EntityExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Get the segmentation stage
    pub fn builder(&self) -> &ClauseTreeBuilder {
        &self.builder
    }

    /// Get the classification stage
    pub fn classifier(&self) -> &ClauseClassifier {
        &self.classifier
    }

    /// Get the risk stage
    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Segment raw contract text, then analyse the clauses
    pub fn analyze_text(&self, text: &str, context: &AnalysisContext) -> ContractAnalysis {
        let clauses = self.builder.segment(text);
        debug!("Segmented {} chars into {} clauses", text.len(), clauses.len());
        self.analyze(clauses, context)
    }

    /// Analyse already segmented top-level clauses
    ///
    /// Sub-clauses are evaluated as part of their parent.
    pub fn analyze(&self, clauses: Vec<ClauseNode>, context: &AnalysisContext) -> ContractAnalysis {
        if clauses.is_empty() {
            warn!("No clauses to analyse; reporting parse failure");
            return ContractAnalysis::parse_failed(context.clone());
        }

        let enriched: Vec<EnrichedClause> = clauses
            .into_iter()
            .map(|clause| self.classifier.enrich(clause, self.extractor.as_ref()))
            .collect();

        let risk = self.engine.analyze(&enriched, context);
        let summary = AnalysisSummary::build(&enriched, &risk);
        debug!(
            "Contract risk {} ({} high, {} medium, {} issues)",
            risk.overall_risk, summary.high_risk_count, summary.medium_risk_count, summary.total_issues
        );

        ContractAnalysis {
            status: AnalysisStatus::Success,
            context: context.clone(),
            overall_risk: Some(risk.overall_risk),
            clauses: enriched,
            risk,
            summary,
        }
    }
}
