//! Counted multiset of pattern strings
//!
//! Entries with a count of zero are never stored: removing the last
//! occurrence of a pattern evicts it entirely, so iteration only ever
//! visits live patterns.

use std::collections::HashMap;

/// A multiset of pattern strings with occurrence counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternMultiset {
    counts: HashMap<String, u64>,
    total: u64,
}

impl PatternMultiset {
    /// Creates an empty multiset
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `pattern`, returning the new count
    pub fn add(&mut self, pattern: String) -> u64 {
        self.total += 1;
        let count = self.counts.entry(pattern).or_insert(0);
        *count += 1;
        *count
    }

    /// Removes one occurrence of `pattern`, returning the count before
    /// removal (0 if the pattern was absent, in which case nothing changes)
    pub fn remove(&mut self, pattern: &str) -> u64 {
        let Some(count) = self.counts.get_mut(pattern) else {
            return 0;
        };
        let before = *count;
        *count -= 1;
        if *count == 0 {
            self.counts.remove(pattern);
        }
        self.total -= 1;
        before
    }

    /// Occurrence count for `pattern` (0 if absent)
    pub fn count(&self, pattern: &str) -> u64 {
        self.counts.get(pattern).copied().unwrap_or(0)
    }

    /// Sum of all occurrence counts
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct patterns
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Iterates over `(pattern, count)` pairs for live patterns
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(p, &c)| (p.as_str(), c))
    }
}
