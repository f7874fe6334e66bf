//! Footer and page-number lines that never belong to a clause

use regex::Regex;

use crate::{SegmenterConfig, SegmenterError};

const FOOTER_PATTERN: &str = r"(?i)^(?:page\s+[0-9]+(?:\s+of\s+[0-9]+)?|page\s*[0-9]+\s*/\s*[0-9]+|[0-9]+\s+of\s+[0-9]+|(?:copyright|©|all\s+rights\s+reserved).*|confidential)$";

/// Recognises repeated page furniture in extracted contract text
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    footer: Regex,
    page_number_max_chars: usize,
}

impl NoiseFilter {
    /// Compile the filter
    pub fn new(config: &SegmenterConfig) -> Result<Self, SegmenterError> {
        Ok(Self {
            footer: Regex::new(FOOTER_PATTERN)?,
            page_number_max_chars: config.page_number_max_chars,
        })
    }

    /// Whether a line is page furniture. Blank lines are not noise.
    pub fn is_noise(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        self.footer.is_match(line) || self.is_page_number(line)
    }

    /// Short lines made of a number plus dashes, dots or spaces ("12", "- 3 -")
    fn is_page_number(&self, line: &str) -> bool {
        line.chars().count() < self.page_number_max_chars
            && line.chars().any(|c| c.is_ascii_digit())
            && line
                .chars()
                .all(|c| c.is_ascii_digit() || c == '-' || c == '.' || c.is_whitespace())
    }
}
