//! Top-N selection.
//!
//! Every ranking in the workspace is "collect into a keyed map, sort by value
//! descending, keep the first n". Ties must keep the order in which keys were
//! first seen, so the maps are `IndexMap`s and the sort here is stable.

use std::cmp::Ordering;

/// Sort entries by value, largest first, and keep the first `n`.
///
/// The sort is stable: equal values keep their incoming order. Values that
/// cannot be compared (NaN) are treated as equal.
pub fn top_n_desc<K, V: PartialOrd>(mut entries: Vec<(K, V)>, n: usize) -> Vec<(K, V)> {
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    entries.truncate(n);
    entries
}

/// Turn a signed request size into a result size; anything below zero is zero.
pub fn clamp_n(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}
