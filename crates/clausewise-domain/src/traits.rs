//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the core pipeline and
//! infrastructure that lives outside it.

use crate::EntitySet;

/// Trait for extracting named entities from clause text
///
/// Implemented outside the core (money/date/party recognisers). The contract
/// is best-effort: an implementation that cannot extract anything returns an
/// empty set rather than an error. Extractors are shared across threads
/// together with the pipeline that owns them.
pub trait EntityExtractor: Send + Sync {
    /// Extract entities from one clause body
    fn extract(&self, text: &str) -> EntitySet;
}

/// Extractor that finds nothing; the default when no collaborator is wired in
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntities;

impl EntityExtractor for NoEntities {
    fn extract(&self, _text: &str) -> EntitySet {
        EntitySet::default()
    }
}

impl<F> EntityExtractor for F
where
    F: Fn(&str) -> EntitySet + Send + Sync,
{
    fn extract(&self, text: &str) -> EntitySet {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities() {
        assert!(NoEntities.extract("Pay $500 by June 1, 2024.").is_empty());
    }

    #[test]
    fn test_closure_extractor() {
        let extractor = |text: &str| EntitySet {
            money: text
                .split_whitespace()
                .filter(|w| w.starts_with('$'))
                .map(|w| w.trim_end_matches('.').to_string())
                .collect(),
            ..Default::default()
        };
        assert_eq!(extractor.extract("Pay $500.").money, vec!["$500"]);
    }
}
