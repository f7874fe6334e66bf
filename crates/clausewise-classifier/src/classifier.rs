//! Weighted pattern classifier

use std::cmp::Ordering;

use clausewise_domain::{Classification, ClauseNode, EnrichedClause, EntityExtractor};
use tracing::trace;

use crate::{CategoryTable, ClassifierConfig, ClassifierError};

/// Accumulated score for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    /// Category label
    pub category: String,
    /// Sum of title and body pattern weights
    pub score: f64,
}

/// Assigns category labels to clauses
#[derive(Debug, Clone)]
pub struct ClauseClassifier {
    table: CategoryTable,
    config: ClassifierConfig,
}

impl ClauseClassifier {
    /// Create a classifier over a category table
    pub fn new(table: CategoryTable, config: ClassifierConfig) -> Result<Self, ClassifierError> {
        config.validate()?;
        Ok(Self { table, config })
    }

    /// Classifier over the built-in categories with default weights
    pub fn builtin() -> Result<Self, ClassifierError> {
        Self::new(CategoryTable::builtin()?, ClassifierConfig::default())
    }

    /// Get the category table
    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Score every category, dropping zero scores, best first
    ///
    /// Ties are broken by category priority, then table order.
    pub fn score(&self, title: &str, text: &str) -> Vec<CategoryScore> {
        let mut scores: Vec<CategoryScore> = self
            .table
            .categories()
            .iter()
            .filter_map(|category| {
                let score = category.matches_in(title) as f64 * self.config.title_weight
                    + category.matches_in(text) as f64 * self.config.text_weight;
                (score > 0.0).then(|| CategoryScore {
                    category: category.name().to_string(),
                    score,
                })
            })
            .collect();

        scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    self.table
                        .priority_rank(&a.category)
                        .cmp(&self.table.priority_rank(&b.category))
                })
        });
        scores
    }

    /// Classify a clause by title and body
    ///
    /// # Examples
    ///
    /// ```
    /// use clausewise_classifier::ClauseClassifier;
    ///
    /// let classifier = ClauseClassifier::builtin()?;
    /// let c = classifier.classify("Indemnification", "Party shall indemnify and defend against any and all claims.");
    /// assert_eq!(c.primary_type, "INDEMNITY");
    ///
    /// let general = classifier.classify("Counterparts", "Signed in counterparts.");
    /// assert_eq!(general.primary_type, "GENERAL");
    /// # Ok::<(), clausewise_classifier::ClassifierError>(())
    /// ```
    pub fn classify(&self, title: &str, text: &str) -> Classification {
        let scores = self.score(title, text);
        trace!("Category scores for '{}': {:?}", title, scores);
        Classification::from_ranked(scores.into_iter().map(|s| s.category).collect())
    }

    /// Classify a clause using its body and every nested sub-clause
    pub fn classify_clause(&self, clause: &ClauseNode) -> Classification {
        self.classify(&clause.title, &clause.full_text())
    }

    /// Compose an enriched clause from a segmented one
    pub fn enrich<E: EntityExtractor + ?Sized>(
        &self,
        clause: ClauseNode,
        extractor: &E,
    ) -> EnrichedClause {
        let classification = self.classify_clause(&clause);
        let entities = extractor.extract(&clause.full_text());
        EnrichedClause::new(clause, classification, entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use clausewise_domain::{EntitySet, NoEntities};

    fn classifier() -> ClauseClassifier {
        ClauseClassifier::builtin().unwrap()
    }

    #[test]
    fn test_title_weighs_double() {
        let scores = classifier().score("Payment", "");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].category, "PAYMENT");
        assert_eq!(scores[0].score, 2.0);
    }

    #[test]
    fn test_title_and_body_accumulate() {
        let scores = classifier().score("Payment", "Each invoice is due upon receipt.");
        let payment = scores.iter().find(|s| s.category == "PAYMENT").unwrap();
        // title "payment" 2.0, body "invoice" and "due upon" 1.0 each
        assert_eq!(payment.score, 4.0);
    }

    #[test]
    fn test_indemnity_outranks_liability() {
        let c = classifier().classify(
            "Indemnification",
            "Party shall indemnify and defend against any and all claims.",
        );
        assert_eq!(c.primary_type, "INDEMNITY");
        assert_eq!(c.secondary_types, vec!["LIABILITY".to_string()]);
    }

    #[test]
    fn test_ties_follow_priority() {
        // one body hit each for TERMINATION ("terminate") and PAYMENT ("fee")
        let c = classifier().classify("", "A fee applies if you terminate.");
        assert_eq!(c.types, vec!["TERMINATION".to_string(), "PAYMENT".to_string()]);
    }

    #[test]
    fn test_unlisted_category_ranks_last_on_tie() {
        let table = CategoryTable::builtin()
            .unwrap()
            .with_category(Category::new("DATA_PROTECTION", &[r"\bpersonal\s+data\b"]).unwrap());
        let classifier = ClauseClassifier::new(table, ClassifierConfig::default()).unwrap();

        let c = classifier.classify("", "Personal data is subject to amendment.");
        assert_eq!(c.types, vec!["AMENDMENT".to_string(), "DATA_PROTECTION".to_string()]);
    }

    #[test]
    fn test_no_match_is_general() {
        let c = classifier().classify("Counterparts", "Signed in counterparts.");
        assert_eq!(c.types, vec!["GENERAL".to_string()]);
        assert!(c.secondary_types.is_empty());
    }

    #[test]
    fn test_at_most_two_secondary_types() {
        let c = classifier().classify(
            "Miscellaneous",
            "Termination, payment of fees, confidential information and governing law of the State.",
        );
        assert!(c.types.len() > 3);
        assert_eq!(c.secondary_types.len(), 2);
    }

    #[test]
    fn test_classify_clause_includes_children() {
        let clause = ClauseNode::new("2", "Miscellaneous", "").with_children(vec![ClauseNode::new(
            "2.1",
            "Arbitration",
            "Disputes go to binding arbitration.",
        )]);
        let c = classifier().classify_clause(&clause);
        assert_eq!(c.primary_type, "DISPUTE_RESOLUTION");
    }

    #[test]
    fn test_enrich_uses_extractor() {
        let clause = ClauseNode::new("3", "Fees", "Client pays $5,000 monthly.");
        let enriched = classifier().enrich(clause.clone(), &|_: &str| EntitySet {
            money: vec!["$5,000".to_string()],
            ..Default::default()
        });
        assert_eq!(enriched.classification.primary_type, "PAYMENT");
        assert_eq!(enriched.entities.money, vec!["$5,000".to_string()]);

        let bare = classifier().enrich(clause, &NoEntities);
        assert!(bare.entities.is_empty());
    }
}
