//! Entities attached to clauses by an external extractor

/// Named entities found in a clause
///
/// Filled by an [`EntityExtractor`](crate::EntityExtractor) implementation
/// outside the core. Entities are carried for display and never influence
/// classification or risk matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySet {
    /// Monetary amounts
    pub money: Vec<String>,
    /// Calendar dates
    pub dates: Vec<String>,
    /// Time spans ("30 days", "two years")
    pub durations: Vec<String>,
    /// Named parties
    pub parties: Vec<String>,
    /// Places and jurisdictions
    pub locations: Vec<String>,
}

impl EntitySet {
    /// Whether no entity of any kind is present
    pub fn is_empty(&self) -> bool {
        self.money.is_empty()
            && self.dates.is_empty()
            && self.durations.is_empty()
            && self.parties.is_empty()
            && self.locations.is_empty()
    }

    /// Append another set, skipping values already present
    pub fn merge(&mut self, other: &EntitySet) {
        merge_unique(&mut self.money, &other.money);
        merge_unique(&mut self.dates, &other.dates);
        merge_unique(&mut self.durations, &other.durations);
        merge_unique(&mut self.parties, &other.parties);
        merge_unique(&mut self.locations, &other.locations);
    }
}

fn merge_unique(into: &mut Vec<String>, from: &[String]) {
    for value in from {
        if !into.contains(value) {
            into.push(value.clone());
        }
    }
}
