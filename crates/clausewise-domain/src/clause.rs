//! Clause module - the located units of a contract

use std::cmp::Ordering;
use std::fmt;

/// Hierarchical clause identifier
///
/// Either a dotted numeric path (`"2"`, `"2.1"`, `"2.1.3"`) or a
/// keyword + numeral form (`"ARTICLE V"`, `"SECTION 4"`). Dotted paths encode
/// ancestry: the parent of `"2.1.3"` is `"2.1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClauseId(String);

impl ClauseId {
    /// Create an identifier from its textual form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id is a sub-clause (contains a dot)
    ///
    /// # Examples
    ///
    /// ```
    /// use clausewise_domain::ClauseId;
    ///
    /// assert!(ClauseId::new("2.1").is_subclause());
    /// assert!(!ClauseId::new("2").is_subclause());
    /// assert!(!ClauseId::new("ARTICLE V").is_subclause());
    /// ```
    pub fn is_subclause(&self) -> bool {
        self.0.contains('.')
    }

    /// Parent id, formed by dropping the last dotted segment
    ///
    /// # Examples
    ///
    /// ```
    /// use clausewise_domain::ClauseId;
    ///
    /// assert_eq!(ClauseId::new("2.1.3").parent(), Some(ClauseId::new("2.1")));
    /// assert_eq!(ClauseId::new("2").parent(), None);
    /// ```
    pub fn parent(&self) -> Option<ClauseId> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| ClauseId::new(parent))
    }

    /// Numeric segments of a dotted id, or `None` if any segment is not a number
    pub fn segments(&self) -> Option<Vec<u32>> {
        self.0
            .split('.')
            .map(|part| part.trim().parse::<u32>().ok())
            .collect()
    }

    /// Leading number of the id (the `2` of `"2.1"`), if numeric
    pub fn leading_number(&self) -> Option<u32> {
        self.0.split('.').next().and_then(|n| n.trim().parse().ok())
    }

    /// Key used for natural ordering of top-level clauses
    pub fn sort_key(&self) -> SortKey {
        if let Some(segments) = self.segments() {
            return SortKey::Numeric(segments);
        }

        let mut words = self.0.split_whitespace();
        if let (Some(keyword), Some(numeral), None) = (words.next(), words.next(), words.next()) {
            let rank = match keyword.to_ascii_uppercase().as_str() {
                "ARTICLE" => Some(0),
                "SECTION" => Some(1),
                _ => None,
            };
            if let Some(rank) = rank {
                let value = numeral
                    .parse::<u32>()
                    .ok()
                    .or_else(|| parse_roman(numeral))
                    .unwrap_or(u32::MAX);
                return SortKey::Keyword { value, rank };
            }
        }

        SortKey::Other(self.0.clone())
    }

    /// Natural ordering: dotted ids component-wise as integers, then
    /// ARTICLE/SECTION ids by numeral value, then anything else by text.
    ///
    /// # Examples
    ///
    /// ```
    /// use clausewise_domain::ClauseId;
    ///
    /// let mut ids: Vec<ClauseId> = ["10", "2", "1"].into_iter().map(ClauseId::new).collect();
    /// ids.sort_by(|a, b| a.natural_cmp(b));
    /// let sorted: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    /// assert_eq!(sorted, ["1", "2", "10"]);
    /// ```
    pub fn natural_cmp(&self, other: &ClauseId) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClauseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClauseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Natural sort key for a [`ClauseId`]
///
/// Variant order is significant: numeric ids sort before keyword ids, which
/// sort before unrecognised ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Dotted numeric path, compared component-wise
    Numeric(Vec<u32>),
    /// ARTICLE/SECTION id; `rank` puts ARTICLE before SECTION on equal values
    Keyword {
        /// Numeral value (roman or arabic), `u32::MAX` if unreadable
        value: u32,
        /// 0 for ARTICLE, 1 for SECTION
        rank: u8,
    },
    /// Anything else, compared as text
    Other(String),
}

/// Parse a roman numeral (either case). Returns `None` on any non-roman character.
pub fn parse_roman(numeral: &str) -> Option<u32> {
    if numeral.is_empty() {
        return None;
    }

    let mut total: u32 = 0;
    let mut prev: u32 = 0;
    for c in numeral.chars().rev() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            prev = value;
        }
    }
    Some(total)
}

/// A located clause with its body and nested sub-clauses
///
/// Built and owned by the segmenter; downstream stages only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseNode {
    /// Hierarchical identifier
    pub id: ClauseId,

    /// Heading text, trailing punctuation stripped
    pub title: String,

    /// Body text belonging to this node, before its first child heading
    pub text: String,

    /// Nested sub-clauses in discovery order
    pub children: Vec<ClauseNode>,
}

impl ClauseNode {
    /// Create a leaf clause
    pub fn new(id: impl Into<ClauseId>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper to attach children
    pub fn with_children(mut self, children: Vec<ClauseNode>) -> Self {
        self.children = children;
        self
    }

    /// Body text followed by every descendant's heading and body, depth first
    ///
    /// # Examples
    ///
    /// ```
    /// use clausewise_domain::ClauseNode;
    ///
    /// let node = ClauseNode::new("2", "Termination", "")
    ///     .with_children(vec![ClauseNode::new("2.1", "At-Will", "Either party may terminate.")]);
    /// assert_eq!(node.full_text(), "2.1 At-Will Either party may terminate.");
    /// ```
    pub fn full_text(&self) -> String {
        let mut out = self.text.trim().to_string();
        for child in &self.children {
            let child_text = format!("{} {} {}", child.id, child.title, child.full_text());
            let child_text = child_text.trim();
            if child_text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(child_text);
        }
        out
    }

    /// Find a node by id in this subtree (including self)
    pub fn find(&self, id: &str) -> Option<&ClauseNode> {
        if self.id.as_str() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ClauseNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(ids: &[&str]) -> Vec<String> {
        let mut ids: Vec<ClauseId> = ids.iter().map(|s| ClauseId::new(*s)).collect();
        ids.sort_by(|a, b| a.natural_cmp(b));
        ids.into_iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_parent_chain() {
        let id = ClauseId::new("3.2.1");
        assert_eq!(id.parent(), Some(ClauseId::new("3.2")));
        assert_eq!(ClauseId::new("3.2").parent(), Some(ClauseId::new("3")));
        assert_eq!(ClauseId::new("3").parent(), None);
        assert_eq!(ClauseId::new("ARTICLE V").parent(), None);
    }

    #[test]
    fn test_natural_numeric_order() {
        assert_eq!(sorted(&["10", "2", "1"]), ["1", "2", "10"]);
        assert_eq!(sorted(&["2.10", "2.9", "2"]), ["2", "2.9", "2.10"]);
    }

    #[test]
    fn test_keyword_ids_after_numeric() {
        assert_eq!(
            sorted(&["ARTICLE X", "3", "ARTICLE II", "SECTION 2", "1"]),
            ["1", "3", "ARTICLE II", "SECTION 2", "ARTICLE X"]
        );
    }

    #[test]
    fn test_article_before_section_on_equal_value() {
        assert_eq!(sorted(&["SECTION 4", "ARTICLE IV"]), ["ARTICLE IV", "SECTION 4"]);
    }

    #[test]
    fn test_parse_roman() {
        assert_eq!(parse_roman("IV"), Some(4));
        assert_eq!(parse_roman("ix"), Some(9));
        assert_eq!(parse_roman("XLII"), Some(42));
        assert_eq!(parse_roman("12"), None);
        assert_eq!(parse_roman(""), None);
    }

    #[test]
    fn test_find_and_count() {
        let tree = ClauseNode::new("2", "Termination", "intro").with_children(vec![
            ClauseNode::new("2.1", "At-Will", "a")
                .with_children(vec![ClauseNode::new("2.1.1", "Notice", "b")]),
            ClauseNode::new("2.2", "For Cause", "c"),
        ]);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.find("2.1.1").map(|n| n.title.as_str()), Some("Notice"));
        assert!(tree.find("3").is_none());
    }

    #[test]
    fn test_full_text_without_children() {
        let node = ClauseNode::new("1", "Definitions", "Terms have meanings.");
        assert_eq!(node.full_text(), "Terms have meanings.");
    }
}
