//! Heading grammar: decides whether a single line opens a new clause

use clausewise_domain::ClauseId;
use regex::Regex;

use crate::{SegmenterConfig, SegmenterError};

/// Structural shape of a heading line.
///
/// Either `<dotted-number>[.|)] <Title>` or
/// `(ARTICLE|SECTION) <numeral> [-] <Title>`.
const HEADING_PATTERN: &str = r"^(?:([0-9]+(?:\.[0-9]+)*)[.)]?\s+([A-Z][A-Za-z0-9 ,\-()]{2,})|(ARTICLE|SECTION)\s+([IVXivx0-9]+)\s*[–\-]?\s*([A-Z][A-Za-z0-9 ,\-()]{2,}))";

const ADDRESS_WORDS: &str = r"(?i)\b(?:road|avenue|ave|street|st|boulevard|blvd|drive|dr|lane|ln|court|ct|place|pl|way|parkway|pkwy|building|floor|suite|ste|box|po|apartment|apt|usa|united\s+states|zip|postal)\b";
const CONTACT_WORDS: &str =
    r"(?i)\b(?:attention|attn|facsimile|fax|phone|telephone|tel|e-?mail|contact)\b";
const SIGNATURE_WORDS: &str = r"(?i)\b(?:in\s+witness|whereof|signature)\b";
const ARTIFACT_WORDS: &str = r"(?i)\b(?:page|exhibit|appendix|schedule)\b";

const ZIP_PATTERN: &str = r"\b[0-9]{5}(?:-[0-9]{4})?\b";
const PHONE_PATTERN: &str = r"[0-9]{3}[-.]?[0-9]{3}[-.]?[0-9]{4}";
const PAGE_MARKER_PATTERN: &str = r"(?i)(?:^|\s)(?:page|p\.)\s+[0-9]+";

const SIGNATURE_MARKER: &str = "/s/";
const MIN_TITLE_CHARS: usize = 3;

/// Vocabulary family that disqualifies a structurally valid heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseVocabulary {
    /// Street, suite, box, zip and country terms
    Address,
    /// Phone, fax, email, attention
    Contact,
    /// Signature blocks
    Signature,
    /// Page, exhibit, appendix, schedule
    DocumentArtifact,
}

/// Why a structurally valid heading line was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Leading number outside the accepted clause range
    NumberOutOfRange(u32),
    /// Matched a disqualifying vocabulary word
    Vocabulary {
        /// Vocabulary family
        family: NoiseVocabulary,
        /// The word that matched
        word: String,
    },
    /// Contains something shaped like a zip code
    ZipCode,
    /// Contains something shaped like a phone number
    PhoneNumber,
    /// Contains a page marker ("Page 3", "p. 3")
    PageMarker,
    /// Title shorter than three characters once punctuation is stripped
    ShortTitle,
}

/// An accepted heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Clause identifier ("2.1", "ARTICLE V")
    pub id: ClauseId,
    /// Title with trailing punctuation stripped
    pub title: String,
    /// Text on the heading line after the title; the start of the clause body
    pub remainder: String,
}

/// Outcome of running the grammar over one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// The line opens a clause
    Heading(Heading),
    /// The line has heading shape but was rejected
    Rejected(Rejection),
    /// The line has no heading shape
    Body,
}

/// Compiled heading grammar
///
/// Built once and shared by reference; holds no mutable state.
#[derive(Debug, Clone)]
pub struct HeadingGrammar {
    heading: Regex,
    vocabularies: Vec<(NoiseVocabulary, Regex)>,
    zip: Regex,
    phone: Regex,
    page_marker: Regex,
    scan_chars: usize,
    max_clause_number: u32,
}

impl HeadingGrammar {
    /// Compile the grammar with default limits
    pub fn new() -> Result<Self, SegmenterError> {
        Self::with_config(&SegmenterConfig::default())
    }

    /// Compile the grammar using the limits from `config`
    pub fn with_config(config: &SegmenterConfig) -> Result<Self, SegmenterError> {
        Ok(Self {
            heading: Regex::new(HEADING_PATTERN)?,
            vocabularies: vec![
                (NoiseVocabulary::Address, Regex::new(ADDRESS_WORDS)?),
                (NoiseVocabulary::Contact, Regex::new(CONTACT_WORDS)?),
                (NoiseVocabulary::Signature, Regex::new(SIGNATURE_WORDS)?),
                (NoiseVocabulary::DocumentArtifact, Regex::new(ARTIFACT_WORDS)?),
            ],
            zip: Regex::new(ZIP_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
            page_marker: Regex::new(PAGE_MARKER_PATTERN)?,
            scan_chars: config.heading_scan_chars,
            max_clause_number: config.max_clause_number,
        })
    }

    /// Parse a line as a heading, returning `None` for anything else
    pub fn parse_heading(&self, line: &str) -> Option<Heading> {
        match self.classify_line(line) {
            LineKind::Heading(heading) => Some(heading),
            _ => None,
        }
    }

    /// Whether the line opens a clause
    pub fn is_heading(&self, line: &str) -> bool {
        self.parse_heading(line).is_some()
    }

    /// Run the grammar over one line and report what it is
    pub fn classify_line(&self, line: &str) -> LineKind {
        let line = line.trim();
        let Some(caps) = self.heading.captures(line) else {
            return LineKind::Body;
        };
        let Some(whole) = caps.get(0) else {
            return LineKind::Body;
        };

        let (id, raw_title) = if let (Some(number), Some(title)) = (caps.get(1), caps.get(2)) {
            // Unparseable numbers are far beyond any clause range.
            let leading = number
                .as_str()
                .split('.')
                .next()
                .and_then(|n| n.parse::<u32>().ok())
                .unwrap_or(u32::MAX);
            if leading == 0 || leading > self.max_clause_number {
                return LineKind::Rejected(Rejection::NumberOutOfRange(leading));
            }
            (ClauseId::new(number.as_str()), title.as_str())
        } else if let (Some(keyword), Some(numeral), Some(title)) =
            (caps.get(3), caps.get(4), caps.get(5))
        {
            (
                ClauseId::new(format!("{} {}", keyword.as_str(), numeral.as_str().to_ascii_uppercase())),
                title.as_str(),
            )
        } else {
            return LineKind::Body;
        };

        if let Some(rejection) = self.noise_in(line) {
            return LineKind::Rejected(rejection);
        }

        let title = strip_trailing_punctuation(raw_title);
        if title.chars().count() < MIN_TITLE_CHARS {
            return LineKind::Rejected(Rejection::ShortTitle);
        }

        let remainder = line[whole.end()..]
            .trim_start_matches(|c: char| c.is_whitespace() || ".,:;-–—".contains(c))
            .trim_end()
            .to_string();

        LineKind::Heading(Heading {
            id,
            title: title.to_string(),
            remainder,
        })
    }

    /// Noise checks limited to the leading characters of the line
    fn noise_in(&self, line: &str) -> Option<Rejection> {
        let head = leading_chars(line, self.scan_chars);

        if head.contains(SIGNATURE_MARKER) {
            return Some(Rejection::Vocabulary {
                family: NoiseVocabulary::Signature,
                word: SIGNATURE_MARKER.to_string(),
            });
        }
        for (family, words) in &self.vocabularies {
            if let Some(m) = words.find(head) {
                return Some(Rejection::Vocabulary {
                    family: *family,
                    word: m.as_str().to_string(),
                });
            }
        }
        if self.zip.is_match(head) {
            return Some(Rejection::ZipCode);
        }
        if self.phone.is_match(head) {
            return Some(Rejection::PhoneNumber);
        }
        if self.page_marker.is_match(head) {
            return Some(Rejection::PageMarker);
        }
        None
    }
}

fn strip_trailing_punctuation(title: &str) -> &str {
    title.trim_end_matches(|c: char| c.is_whitespace() || ".,:;".contains(c))
}

/// Longest prefix of `s` holding at most `n` characters
pub(crate) fn leading_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
