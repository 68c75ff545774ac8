// src/core/matcher.rs
use crate::core::normalizer::normalize;
use crate::core::types::WordEntry;

/// A search query normalized once, ready to test many entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            needle: normalize(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when the query filters nothing ("show all").
    pub fn is_match_all(&self) -> bool {
        self.needle.is_empty()
    }

    /// Substring containment on either side of the pair, after normalization.
    pub fn matches(&self, entry: &WordEntry) -> bool {
        if self.is_match_all() {
            return true;
        }
        normalize(&entry.source_text).contains(&self.needle)
            || normalize(&entry.target_text).contains(&self.needle)
    }

    /// Keeps the entries that match, in their input order.
    pub fn filter<'a>(&self, entries: &'a [WordEntry]) -> Vec<&'a WordEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new("")
    }
}

/// One-shot form of [`SearchQuery::matches`].
pub fn matches(entry: &WordEntry, query: &str) -> bool {
    SearchQuery::new(query).matches(entry)
}
