//! Classification module - category labels and the enriched clause

use crate::{ClauseNode, EntitySet};

/// Category used when no pattern scores
pub const GENERAL_CATEGORY: &str = "GENERAL";

/// Ordered category labels for one clause
///
/// Invariant: `types` is never empty and contains no duplicates;
/// `primary_type == types[0]` and `secondary_types` are the next (up to two) labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// All scored categories, highest first
    pub types: Vec<String>,

    /// Highest-ranked category
    pub primary_type: String,

    /// Up to two next-ranked categories
    pub secondary_types: Vec<String>,
}

impl Classification {
    /// Build a classification from ranked labels
    ///
    /// Duplicates are dropped (first occurrence wins) and an empty list
    /// becomes `["GENERAL"]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clausewise_domain::Classification;
    ///
    /// let c = Classification::from_ranked(vec!["INDEMNITY".into(), "LIABILITY".into()]);
    /// assert_eq!(c.primary_type, "INDEMNITY");
    /// assert_eq!(c.secondary_types, vec!["LIABILITY".to_string()]);
    ///
    /// let general = Classification::from_ranked(Vec::new());
    /// assert_eq!(general.types, vec!["GENERAL".to_string()]);
    /// ```
    pub fn from_ranked(ranked: Vec<String>) -> Self {
        let mut types: Vec<String> = Vec::with_capacity(ranked.len());
        for label in ranked {
            if !types.contains(&label) {
                types.push(label);
            }
        }
        if types.is_empty() {
            types.push(GENERAL_CATEGORY.to_string());
        }

        let primary_type = types[0].clone();
        let secondary_types = types.iter().skip(1).take(2).cloned().collect();

        Self {
            types,
            primary_type,
            secondary_types,
        }
    }

    /// The fallback classification (`["GENERAL"]`)
    pub fn general() -> Self {
        Self::from_ranked(Vec::new())
    }

    /// Whether the label is among this clause's categories
    pub fn has(&self, category: &str) -> bool {
        self.types.iter().any(|t| t == category)
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::general()
    }
}

/// A clause composed with its classification and extracted entities
///
/// Constructed explicitly from its parts so every downstream field is present.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedClause {
    /// The segmented clause (with any sub-clauses)
    pub clause: ClauseNode,

    /// Category labels
    pub classification: Classification,

    /// Entities found by the external extractor; display only
    pub entities: EntitySet,
}

impl EnrichedClause {
    /// Compose an enriched clause
    pub fn new(clause: ClauseNode, classification: Classification, entities: EntitySet) -> Self {
        Self {
            clause,
            classification,
            entities,
        }
    }

    /// Enrich a clause with only the default `GENERAL` classification
    pub fn unclassified(clause: ClauseNode) -> Self {
        Self::new(clause, Classification::general(), EntitySet::default())
    }

    /// Clause id text
    pub fn id(&self) -> &str {
        self.clause.id.as_str()
    }

    /// Clause title
    pub fn title(&self) -> &str {
        &self.clause.title
    }

    /// Category labels, highest first
    pub fn types(&self) -> &[String] {
        &self.classification.types
    }

    /// Text evaluated by rules: the clause body plus its nested sub-clauses
    pub fn analysis_text(&self) -> String {
        self.clause.full_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let c = Classification::from_ranked(vec![
            "PAYMENT".into(),
            "TERMINATION".into(),
            "PAYMENT".into(),
            "WARRANTY".into(),
            "LIABILITY".into(),
        ]);
        assert_eq!(c.types, vec!["PAYMENT", "TERMINATION", "WARRANTY", "LIABILITY"]);
        assert_eq!(c.secondary_types, vec!["TERMINATION", "WARRANTY"]);
    }

    #[test]
    fn test_never_empty() {
        let c = Classification::default();
        assert_eq!(c.primary_type, GENERAL_CATEGORY);
        assert!(c.secondary_types.is_empty());
        assert!(c.has("GENERAL"));
    }

    #[test]
    fn test_unclassified_clause_defaults_to_general() {
        let enriched = EnrichedClause::unclassified(ClauseNode::new("4", "Notices", "By mail."));
        assert_eq!(enriched.types(), ["GENERAL".to_string()]);
        assert_eq!(enriched.id(), "4");
        assert_eq!(enriched.analysis_text(), "By mail.");
    }
}
