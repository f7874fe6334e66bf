//! Category pattern table

use regex::{Regex, RegexBuilder};

use crate::ClassifierError;

/// Tie-break order for equally scored categories, highest priority first
pub const PRIORITY: &[&str] = &[
    "INDEMNITY",
    "TERMINATION",
    "LIABILITY",
    "PAYMENT",
    "CONFIDENTIALITY",
    "INTELLECTUAL_PROPERTY",
    "GOVERNING_LAW",
    "DISPUTE_RESOLUTION",
    "NON_COMPETE",
    "WARRANTY",
    "FORCE_MAJEURE",
    "ASSIGNMENT",
    "AMENDMENT",
    "SEVERABILITY",
    "ENTIRE_AGREEMENT",
];

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "INDEMNITY",
        &[
            r"\bindemnif(y|ication|ied)\b",
            r"\bhold\s+harmless\b",
            r"\bdefend.*against\b",
            r"\bliable.*for.*damages\b",
            r"\breimburse.*losses\b",
        ],
    ),
    (
        "TERMINATION",
        &[
            r"\btermination\b",
            r"\bterminat(e|ed|ing)\b",
            r"\bend.*agreement\b",
            r"\bcancel(lation)?\b",
            r"\bwithdraw.*from\b",
            r"\bnotice.*to.*terminate\b",
        ],
    ),
    (
        "PAYMENT",
        &[
            r"\bpayment\b",
            r"\bfees?\b",
            r"\bcompensation\b",
            r"\bremuneration\b",
            r"\$[0-9,]+",
            r"\binvoice\b",
            r"\bdue.*upon\b",
        ],
    ),
    (
        "CONFIDENTIALITY",
        &[
            r"\bconfidential(ity)?\b",
            r"\bnon-disclosure\b",
            r"\bproprietary.*information\b",
            r"\btrade.*secret\b",
            r"\bnot.*disclose\b",
        ],
    ),
    (
        "LIABILITY",
        &[
            r"\bliability\b",
            r"\bliable\b",
            r"\bdamages\b",
            r"\bloss(es)?\b",
            r"\bclaims?\b",
            r"\blimitation.*of.*liability\b",
        ],
    ),
    (
        "INTELLECTUAL_PROPERTY",
        &[
            r"\bintellectual\s+property\b",
            r"\bcopyright\b",
            r"\bpatent\b",
            r"\btrademark\b",
            r"\bownership.*of.*work\b",
            r"\blicense\b",
        ],
    ),
    (
        "GOVERNING_LAW",
        &[
            r"\bgoverning\s+law\b",
            r"\bjurisdiction\b",
            r"\bapplicable.*law\b",
            r"\bcourts?\s+of\b",
            r"\blaws?\s+of.*state\b",
        ],
    ),
    (
        "WARRANTY",
        &[
            r"\bwarrant(y|ies|ed)\b",
            r"\brepresent(ation)?s?\b",
            r"\bguarantee\b",
            r"\bas\s+is\b",
            r"\bno.*warranty\b",
        ],
    ),
    (
        "FORCE_MAJEURE",
        &[
            r"\bforce\s+majeure\b",
            r"\bact.*of.*god\b",
            r"\bunavoidable.*circumstance\b",
            r"\bbeyond.*reasonable.*control\b",
        ],
    ),
    (
        "DISPUTE_RESOLUTION",
        &[
            r"\bdispute.*resolution\b",
            r"\barbitration\b",
            r"\bmediation\b",
            r"\blitigation\b",
            r"\bresolve.*disputes?\b",
        ],
    ),
    (
        "NON_COMPETE",
        &[
            r"\bnon-compete\b",
            r"\bcompetitive.*activity\b",
            r"\brestrictive.*covenant\b",
            r"\bnot.*compete\b",
        ],
    ),
    (
        "ASSIGNMENT",
        &[
            r"\bassignment\b",
            r"\bassign.*rights\b",
            r"\btransfer.*agreement\b",
            r"\bnot.*assign.*without\b",
        ],
    ),
    (
        "AMENDMENT",
        &[
            r"\bamendment\b",
            r"\bmodif(y|ication)\b",
            r"\bchange.*terms\b",
            r"\bvaried.*by.*writing\b",
        ],
    ),
    (
        "SEVERABILITY",
        &[
            r"\bseverability\b",
            r"\bseverable\b",
            r"\binvalid.*provision\b",
            r"\bunenforceable.*term\b",
        ],
    ),
    (
        "ENTIRE_AGREEMENT",
        &[
            r"\bentire\s+agreement\b",
            r"\bsupersede\b",
            r"\bprior.*agreement\b",
            r"\bintegration\s+clause\b",
        ],
    ),
];

/// A category and its compiled patterns
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    patterns: Vec<Regex>,
}

impl Category {
    /// Compile a category from case-insensitive patterns
    pub fn new<S: AsRef<str>>(name: &str, patterns: &[S]) -> Result<Self, ClassifierError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ClassifierError::Pattern {
                        category: name.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_uppercase(),
            patterns,
        })
    }

    /// Category label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct patterns that match `text`
    pub fn matches_in(&self, text: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(text)).count()
    }
}

/// Immutable table of categories plus their tie-break priority
///
/// Built once and passed to the classifier; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
    priority: Vec<String>,
}

impl CategoryTable {
    /// The built-in contract categories
    pub fn builtin() -> Result<Self, ClassifierError> {
        let categories = BUILTIN
            .iter()
            .map(|&(name, patterns)| Category::new(name, patterns))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            categories,
            priority: PRIORITY.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Add a category; a category with the same name is replaced
    ///
    /// Categories absent from the priority list rank below every listed one.
    pub fn with_category(mut self, category: Category) -> Self {
        match self.categories.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
        self
    }

    /// All categories in table order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Tie-break rank of a category; lower wins, unlisted categories rank last
    pub fn priority_rank(&self, name: &str) -> usize {
        self.priority
            .iter()
            .position(|p| p == name)
            .unwrap_or(self.priority.len())
    }

    /// Category names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name())
    }
}
