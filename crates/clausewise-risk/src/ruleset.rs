//! Ordered collection of rules

use std::path::Path;

use tracing::debug;

use crate::playbook::{load_playbook, parse_playbook, PlaybookFormat};
use crate::{RiskError, RiskRule};

const BUILTIN_RULES: &str = include_str!("builtin_rules.toml");

/// The rules an engine evaluates, in evaluation order
///
/// Built-in rules come first; playbook rules are appended and never replace
/// an existing rule. Ids need not be unique: a playbook rule reusing a
/// built-in id is evaluated alongside it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RiskRule>,
}

impl RuleSet {
    /// An empty rule set
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rule table
    pub fn builtin() -> Result<Self, RiskError> {
        let mut set = Self::empty();
        set.extend(parse_playbook(BUILTIN_RULES, PlaybookFormat::Toml)?);
        Ok(set)
    }

    /// Built-in rules followed by the rules of a playbook file
    pub fn with_playbook(path: &Path) -> Result<Self, RiskError> {
        let mut set = Self::builtin()?;
        set.append_playbook(path)?;
        Ok(set)
    }

    /// Append one rule
    pub fn push(&mut self, rule: RiskRule) {
        self.rules.push(rule);
    }

    /// Append rules in order
    pub fn extend<I: IntoIterator<Item = RiskRule>>(&mut self, rules: I) {
        self.rules.extend(rules);
    }

    /// Append the rules of a playbook file
    ///
    /// The whole playbook is validated before any rule is added.
    pub fn append_playbook(&mut self, path: &Path) -> Result<usize, RiskError> {
        let rules = load_playbook(path)?;
        let added = rules.len();
        self.rules.extend(rules);
        debug!("Rule set now holds {} rules", self.rules.len());
        Ok(added)
    }

    /// First rule with this id, in evaluation order
    pub fn get(&self, rule_id: &str) -> Option<&RiskRule> {
        self.rules.iter().find(|r| r.rule_id == rule_id)
    }

    /// Every rule with this id, in evaluation order
    pub fn all_with_id<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a RiskRule> + 'a {
        self.rules.iter().filter(move |r| r.rule_id == rule_id)
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, RiskRule> {
        self.rules.iter()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RiskRule;
    type IntoIter = std::slice::Iter<'a, RiskRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
