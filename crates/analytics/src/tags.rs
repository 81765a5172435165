//! TagAnalytics: rankings and search over tags.csv.
//!
//! Two views of the same rows are kept: the raw per-row log (used for
//! frequency counts) and the distinct tag set, deduplicated by exact text and
//! kept in first-seen order.

use data_loader::ranking::top_n_desc;
use data_loader::{parser, Tag};
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;
use std::path::Path;

pub struct TagAnalytics {
    tags: Vec<Tag>,
    distinct: IndexSet<String>,
}

impl TagAnalytics {
    pub fn new(tags: Vec<Tag>) -> Self {
        let distinct = tags.iter().map(|tag| tag.tag.clone()).collect();
        Self { tags, distinct }
    }

    /// Load tags.csv; an unreadable file gives no tags.
    pub fn load(path: &Path) -> Self {
        Self::new(parser::load_or_empty(path, parser::parse_tags))
    }

    /// Distinct tags in first-seen order
    pub fn distinct_tags(&self) -> &IndexSet<String> {
        &self.distinct
    }

    /// Distinct tags with the most whitespace-separated words
    pub fn top_by_word_count(&self, n: usize) -> Vec<(String, usize)> {
        let word_counts = self
            .distinct
            .iter()
            .map(|tag| (tag.clone(), tag.split_whitespace().count()))
            .collect();
        top_n_desc(word_counts, n)
    }

    /// Longest distinct tags by character count
    pub fn top_by_length(&self, n: usize) -> Vec<String> {
        let lengths = self
            .distinct
            .iter()
            .map(|tag| (tag.clone(), tag.chars().count()))
            .collect();
        top_n_desc(lengths, n)
            .into_iter()
            .map(|(tag, _)| tag)
            .collect()
    }

    /// Tags that are both among the top-n by word count and the top-n by length
    pub fn top_by_word_count_and_length(&self, n: usize) -> BTreeSet<String> {
        let by_words: BTreeSet<String> = self
            .top_by_word_count(n)
            .into_iter()
            .map(|(tag, _)| tag)
            .collect();
        let by_length: BTreeSet<String> = self.top_by_length(n).into_iter().collect();

        by_words.intersection(&by_length).cloned().collect()
    }

    /// Most used tags, counted case-insensitively over every row.
    ///
    /// Each tag is reported with the casing of its first occurrence.
    pub fn top_by_frequency(&self, n: usize) -> Vec<(String, usize)> {
        let mut counts: IndexMap<String, (String, usize)> = IndexMap::new();
        for tag in &self.tags {
            counts
                .entry(tag.tag.to_lowercase())
                .or_insert_with(|| (tag.tag.clone(), 0))
                .1 += 1;
        }

        let frequencies = counts.into_values().collect();
        top_n_desc(frequencies, n)
    }

    /// Distinct tags containing `word` (case-insensitive), sorted alphabetically
    pub fn tags_containing(&self, word: &str) -> Vec<String> {
        let needle = word.to_lowercase();
        let mut matches: Vec<String> = self
            .distinct
            .iter()
            .filter(|tag| tag.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort();
        matches
    }
}
