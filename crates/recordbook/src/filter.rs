//! Display filtering for record lists.
//!
//! Filtering never copies or reorders records. It yields the backing indices
//! of the records that pass, so row actions (edit, delete) always address the
//! unfiltered list.

/// A record that can be narrowed by free text and by category.
pub trait Filterable {
    /// Text searched by the query, case-insensitively.
    fn search_text(&self) -> String;

    /// Category value matched exactly by the category filter.
    fn category(&self) -> &str;
}

/// Two independent predicates combined with AND.
///
/// An empty query or empty category always passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Free-text query. Trimmed and lowercased before matching.
    pub query: String,
    /// Exact category, or empty for any.
    pub category: String,
}

impl RecordFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if either predicate is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.category.is_empty()
    }

    /// Clears both predicates.
    pub fn clear(&mut self) {
        self.query.clear();
        self.category.clear();
    }

    /// Returns true if `record` passes both predicates.
    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        let text = self.query.trim().to_lowercase();
        let hits_text = text.is_empty() || record.search_text().to_lowercase().contains(&text);
        let hits_category = self.category.is_empty() || record.category() == self.category;
        hits_text && hits_category
    }

    /// Returns the backing indices of passing records, in list order.
    pub fn visible_indices<R: Filterable>(&self, records: &[R]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(*r))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Distinct non-empty categories in order of first appearance.
pub fn distinct_categories<R: Filterable>(records: &[R]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        let category = record.category();
        if !category.is_empty() && !seen.iter().any(|s| s == category) {
            seen.push(category.to_string());
        }
    }
    seen
}
