//! Clause tree builder
//!
//! Turns raw contract text into an ordered sequence of top-level clauses.
//! Runs in four steps: scan for headings, assemble bodies, nest sub-clauses
//! under their parents, then fold insubstantial clauses into their
//! predecessor. Text without any headings falls back to paragraph splitting.

use clausewise_domain::ClauseNode;
use tracing::{debug, trace};

use crate::grammar::{Heading, HeadingGrammar, LineKind};
use crate::noise::NoiseFilter;
use crate::{SegmenterConfig, SegmenterError};

/// A heading found during the scan pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedHeading {
    /// Zero-based line index of the heading within the document
    pub line_index: usize,
    /// The parsed heading
    pub heading: Heading,
}

/// Builds clause trees from contract text
#[derive(Debug, Clone)]
pub struct ClauseTreeBuilder {
    grammar: HeadingGrammar,
    noise: NoiseFilter,
    config: SegmenterConfig,
}

impl ClauseTreeBuilder {
    /// Create a builder from a validated configuration
    pub fn new(config: SegmenterConfig) -> Result<Self, SegmenterError> {
        config.validate()?;
        Ok(Self {
            grammar: HeadingGrammar::with_config(&config)?,
            noise: NoiseFilter::new(&config)?,
            config,
        })
    }

    /// Create a builder with default configuration
    pub fn default_config() -> Result<Self, SegmenterError> {
        Self::new(SegmenterConfig::default())
    }

    /// Get the builder configuration
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Get the heading grammar
    pub fn grammar(&self) -> &HeadingGrammar {
        &self.grammar
    }

    /// Segment contract text into top-level clauses
    ///
    /// Empty or whitespace-only text yields no clauses. Any other text
    /// yields at least one.
    pub fn segment(&self, text: &str) -> Vec<ClauseNode> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lines: Vec<&str> = text.lines().collect();
        let headings = self.scan_lines(&lines);
        if headings.is_empty() {
            debug!("No headings found, falling back to paragraph segmentation");
            return self.fallback(text, &lines);
        }

        debug!("Found {} headings in {} lines", headings.len(), lines.len());
        let flat = self.assemble(&lines, headings);
        let roots = reorganize(flat);
        self.merge(roots)
    }

    /// Scan pass: every accepted heading, in document order
    pub fn scan(&self, text: &str) -> Vec<LocatedHeading> {
        let lines: Vec<&str> = text.lines().collect();
        self.scan_lines(&lines)
    }

    fn scan_lines(&self, lines: &[&str]) -> Vec<LocatedHeading> {
        let mut found = Vec::new();
        for (line_index, line) in lines.iter().enumerate() {
            if self.noise.is_noise(line) {
                continue;
            }
            match self.grammar.classify_line(line) {
                LineKind::Heading(heading) => found.push(LocatedHeading {
                    line_index,
                    heading,
                }),
                LineKind::Rejected(reason) => {
                    trace!("Line {} rejected as heading: {:?}", line_index, reason);
                }
                LineKind::Body => {}
            }
        }
        found
    }

    /// Assembly pass: body text runs from the heading line to the next heading
    fn assemble(&self, lines: &[&str], headings: Vec<LocatedHeading>) -> Vec<ClauseNode> {
        let ends: Vec<usize> = headings
            .iter()
            .skip(1)
            .map(|h| h.line_index)
            .chain(std::iter::once(lines.len()))
            .collect();

        headings
            .into_iter()
            .zip(ends)
            .map(|(located, end)| {
                let Heading {
                    id,
                    title,
                    remainder,
                } = located.heading;

                let mut parts: Vec<&str> = Vec::new();
                if !remainder.is_empty() {
                    parts.push(&remainder);
                }
                parts.extend(
                    lines[located.line_index + 1..end]
                        .iter()
                        .map(|line| line.trim())
                        .filter(|line| !line.is_empty() && !self.noise.is_noise(line)),
                );
                let body = parts.join(" ");

                ClauseNode::new(id, title, body)
            })
            .collect()
    }

    /// Integrity merge over sorted top-level clauses
    fn merge(&self, roots: Vec<ClauseNode>) -> Vec<ClauseNode> {
        let mut merged: Vec<ClauseNode> = Vec::with_capacity(roots.len());
        for clause in roots {
            if self.is_substantial(&clause) {
                merged.push(clause);
                continue;
            }
            match merged.last_mut() {
                Some(previous) if self.is_substantial(previous) => {
                    trace!("Folding clause {} into {}", clause.id, previous.id);
                    let body = clause.text.trim();
                    if !body.is_empty() {
                        if !previous.text.is_empty() {
                            previous.text.push(' ');
                        }
                        previous.text.push_str(body);
                    }
                }
                _ => merged.push(clause),
            }
        }
        merged
    }

    /// A clause is substantial if it is long, has several sentences, or has children
    pub fn is_substantial(&self, clause: &ClauseNode) -> bool {
        !clause.children.is_empty()
            || clause.text.chars().count() >= self.config.substantial_min_chars
            || sentence_marks(&clause.text) >= self.config.substantial_min_sentence_marks
    }

    /// Paragraph-based segmentation for text without headings
    ///
    /// Segments are numbered by position before short ones are skipped, so
    /// ids can have gaps.
    fn fallback(&self, text: &str, lines: &[&str]) -> Vec<ClauseNode> {
        let mut candidates = paragraphs(lines);
        if candidates.is_empty() {
            candidates = lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| line.chars().count() > self.config.min_fallback_line_chars)
                .map(str::to_string)
                .collect();
        }

        let clauses: Vec<ClauseNode> = candidates
            .into_iter()
            .take(self.config.max_fallback_segments)
            .enumerate()
            .filter(|(_, p)| p.chars().count() > self.config.min_fallback_paragraph_chars)
            .map(|(idx, paragraph)| {
                let n = idx + 1;
                ClauseNode::new(n.to_string(), format!("Section {}", n), paragraph)
            })
            .collect();

        if clauses.is_empty() {
            debug!("Paragraph fallback found nothing, using whole text");
            return vec![ClauseNode::new("1", "Contract", text.trim())];
        }
        clauses
    }
}

/// Blank-line-delimited paragraphs, lines joined with spaces
fn paragraphs(lines: &[&str]) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

/// Nest sub-clauses under their parents and sort the top level
///
/// A sub-clause attaches to the nearest preceding clause carrying its parent
/// id, or failing that the first later one. Sub-clauses whose parent never
/// appears are dropped.
fn reorganize(flat: Vec<ClauseNode>) -> Vec<ClauseNode> {
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (idx, node) in flat.iter().enumerate() {
        let Some(parent_id) = node.id.parent() else {
            roots.push(idx);
            continue;
        };
        let parent = flat[..idx]
            .iter()
            .rposition(|c| c.id == parent_id)
            .or_else(|| {
                flat[idx + 1..]
                    .iter()
                    .position(|c| c.id == parent_id)
                    .map(|p| p + idx + 1)
            });
        match parent {
            Some(p) => children_of[p].push(idx),
            None => debug!("Dropping sub-clause {} without parent {}", node.id, parent_id),
        }
    }

    let mut slots: Vec<Option<ClauseNode>> = flat.into_iter().map(Some).collect();
    let mut top: Vec<ClauseNode> = roots
        .into_iter()
        .filter_map(|idx| build_node(idx, &mut slots, &children_of))
        .collect();
    top.sort_by(|a, b| a.id.natural_cmp(&b.id));
    top
}

fn build_node(
    idx: usize,
    slots: &mut [Option<ClauseNode>],
    children_of: &[Vec<usize>],
) -> Option<ClauseNode> {
    let mut node = slots[idx].take()?;
    node.children = children_of[idx]
        .iter()
        .filter_map(|&child| build_node(child, slots, children_of))
        .collect();
    Some(node)
}

/// Runs of sentence-ending punctuation
fn sentence_marks(text: &str) -> usize {
    let mut count = 0;
    let mut in_run = false;
    for c in text.chars() {
        let mark = matches!(c, '.' | '!' | '?');
        if mark && !in_run {
            count += 1;
        }
        in_run = mark;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ClauseTreeBuilder {
        ClauseTreeBuilder::default_config().unwrap()
    }

    fn ids(clauses: &[ClauseNode]) -> Vec<&str> {
        clauses.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_sentence_marks() {
        assert_eq!(sentence_marks("One. Two! Three?"), 3);
        assert_eq!(sentence_marks("Wait... what?!"), 2);
        assert_eq!(sentence_marks("none"), 0);
    }

    #[test]
    fn test_scan_reports_line_indices() {
        let text = "Preamble\n1. Definitions\nbody\n2. Term\nbody";
        let found = builder().scan(text);
        let indices: Vec<usize> = found.iter().map(|h| h.line_index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_body_joins_wrapped_lines_and_skips_noise() {
        let text = "1. Payment Terms\nClient shall pay all fees\nwithin thirty days.\nPage 2 of 5\n\nLate fees apply. Interest accrues.";
        let clauses = builder().segment(text);
        assert_eq!(clauses.len(), 1);
        assert_eq!(
            clauses[0].text,
            "Client shall pay all fees within thirty days. Late fees apply. Interest accrues."
        );
    }

    #[test]
    fn test_preamble_before_first_heading_is_discarded() {
        let text = "THIS AGREEMENT is made today.\n1. Services\nProvider shall render services. Provider shall be diligent.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1"]);
        assert!(!clauses[0].text.contains("THIS AGREEMENT"));
    }

    #[test]
    fn test_nested_grandchildren() {
        let text = "1. Term\nIntro. More.\n1.1 Initial Term\nTwo years.\n1.1.1 Extension\nOne more year.\n1.2 Renewal\nAutomatic.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1"]);
        let term = &clauses[0];
        assert_eq!(ids(&term.children), vec!["1.1", "1.2"]);
        assert_eq!(ids(&term.children[0].children), vec!["1.1.1"]);
    }

    #[test]
    fn test_orphan_subclause_dropped() {
        let text = "1. Term\nFirst. Second.\n3.1 Orphan Clause\nNo parent here.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1"]);
        assert!(clauses[0].find("3.1").is_none());
    }

    #[test]
    fn test_subclause_attaches_to_most_recent_parent() {
        let text = "1. Alpha Terms\nA. B.\n2. Beta Terms\nC. D.\n1. Alpha Again\nE. F.\n1.1 Child Clause\nG. H.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "1", "2"]);
        assert!(clauses[0].children.is_empty());
        assert_eq!(clauses[1].title, "Alpha Again");
        assert_eq!(ids(&clauses[1].children), vec!["1.1"]);
    }

    #[test]
    fn test_top_level_natural_order() {
        let text = "10. Notices Clause\nA. B.\n2. Payment Clause\nC. D.\n1. Services Clause\nE. F.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "2", "10"]);
    }

    #[test]
    fn test_numeric_before_article() {
        let text = "ARTICLE II - Payment\nA. B.\n1. Definitions\nC. D.\nARTICLE I - Services\nE. F.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "ARTICLE I", "ARTICLE II"]);
    }

    #[test]
    fn test_insubstantial_clause_folded_into_previous() {
        let text = "1. Services\nProvider shall perform. Client shall cooperate.\n2. Counterparts\nMay be signed in counterparts";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1"]);
        assert!(clauses[0].text.ends_with("Client shall cooperate. May be signed in counterparts"));
    }

    #[test]
    fn test_insubstantial_first_clause_kept() {
        let text = "1. Scope\nShort\n2. Term\nThis runs a year. It renews.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "2"]);
        assert_eq!(clauses[0].text, "Short");
    }

    #[test]
    fn test_insubstantial_after_insubstantial_kept() {
        let text = "1. Scope\nShort\n2. Term\nAlso short";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "2"]);
    }

    #[test]
    fn test_fallback_paragraphs() {
        let text = "This services agreement is entered into by the parties below.\n\nThe provider will deliver the services described in the order form.\n\nshort";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "2"]);
        assert_eq!(clauses[0].title, "Section 1");
        assert_eq!(clauses[1].title, "Section 2");
        assert!(clauses.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_fallback_single_paragraph_keeps_every_line() {
        let text = "The customer agrees to pay every invoice within thirty days of receipt.\nShort line kept?\nThe provider may suspend service for any invoice left unpaid after that.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1"]);
        assert_eq!(clauses[0].title, "Section 1");
        assert!(clauses[0].text.contains("Short line kept?"));
        assert!(clauses[0].text.ends_with("left unpaid after that."));
    }

    #[test]
    fn test_fallback_numbers_by_position() {
        let text = "This services agreement is entered into by the parties below.\n\nBrief note\n\nThe provider will deliver the services described in the order form.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "3"]);
        assert_eq!(clauses[1].title, "Section 3");
    }

    #[test]
    fn test_fallback_keeps_footer_like_paragraphs() {
        let text = "The parties agree to the terms set out in this document.\n\nCopyright 2024 Acme Corporation. All rights reserved.";
        let clauses = builder().segment(text);
        assert_eq!(ids(&clauses), vec!["1", "2"]);
        assert!(clauses[1].text.starts_with("Copyright 2024"));
    }

    #[test]
    fn test_fallback_capped() {
        let paragraph = "Each paragraph here is comfortably longer than thirty characters.";
        let text = vec![paragraph; 30].join("\n\n");
        assert_eq!(builder().segment(&text).len(), 20);
    }

    #[test]
    fn test_fallback_whole_contract() {
        let clauses = builder().segment("Too short to split");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].title, "Contract");
        assert_eq!(clauses[0].text, "Too short to split");
    }

    #[test]
    fn test_empty_input() {
        assert!(builder().segment("").is_empty());
        assert!(builder().segment("  \n\t\n ").is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SegmenterConfig {
            heading_scan_chars: 0,
            ..Default::default()
        };
        assert!(ClauseTreeBuilder::new(config).is_err());
    }
}
