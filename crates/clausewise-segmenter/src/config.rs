//! Configuration for the segmenter

use serde::{Deserialize, Serialize};

use crate::SegmenterError;

/// Thresholds used by the heading grammar and the clause tree builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Body length (characters) at which a clause counts as substantial
    pub substantial_min_chars: usize,

    /// Sentence-ending marks at which a clause counts as substantial
    pub substantial_min_sentence_marks: usize,

    /// Leading characters of a heading line checked for noise vocabulary
    pub heading_scan_chars: usize,

    /// Largest accepted leading clause number
    pub max_clause_number: u32,

    /// Maximum number of clauses produced by paragraph fallback
    pub max_fallback_segments: usize,

    /// Minimum length of a line used as a segment when no paragraph is found
    pub min_fallback_line_chars: usize,

    /// Paragraphs this short or shorter are skipped by the fallback
    pub min_fallback_paragraph_chars: usize,

    /// Digit-only lines shorter than this are treated as page numbers
    pub page_number_max_chars: usize,
}

impl SegmenterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SegmenterError> {
        if self.heading_scan_chars == 0 {
            return Err(SegmenterError::Config(
                "heading_scan_chars must be greater than 0".to_string(),
            ));
        }
        if self.max_clause_number == 0 {
            return Err(SegmenterError::Config(
                "max_clause_number must be greater than 0".to_string(),
            ));
        }
        if self.max_fallback_segments == 0 {
            return Err(SegmenterError::Config(
                "max_fallback_segments must be greater than 0".to_string(),
            ));
        }
        if self.substantial_min_chars == 0 && self.substantial_min_sentence_marks == 0 {
            return Err(SegmenterError::Config(
                "substantial_min_chars and substantial_min_sentence_marks cannot both be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Strict preset: fewer merges, tighter fallback
    pub fn strict() -> Self {
        Self {
            substantial_min_chars: 80,
            substantial_min_sentence_marks: 1,
            max_fallback_segments: 10,
            ..Self::default()
        }
    }

    /// Lenient preset: fold more short clauses, allow longer documents without headings
    pub fn lenient() -> Self {
        Self {
            substantial_min_chars: 250,
            substantial_min_sentence_marks: 3,
            max_fallback_segments: 50,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, SegmenterError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| SegmenterError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, SegmenterError> {
        toml::to_string_pretty(self)
            .map_err(|e| SegmenterError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            substantial_min_chars: 150,
            substantial_min_sentence_marks: 2,
            heading_scan_chars: 100,
            max_clause_number: 99,
            max_fallback_segments: 20,
            min_fallback_line_chars: 50,
            min_fallback_paragraph_chars: 30,
            page_number_max_chars: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(SegmenterConfig::default().validate().is_ok());
        assert!(SegmenterConfig::strict().validate().is_ok());
        assert!(SegmenterConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_clause_number() {
        let config = SegmenterConfig {
            max_clause_number: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SegmenterError::Config(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SegmenterConfig::from_toml("substantial_min_chars = 40").unwrap();
        assert_eq!(config.substantial_min_chars, 40);
        assert_eq!(config.max_clause_number, 99);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SegmenterConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = SegmenterConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = SegmenterConfig::from_toml("max_clause_number = \"lots\"");
        assert!(matches!(result, Err(SegmenterError::Config(msg)) if msg.contains("TOML")));
    }
}
