//! The provider contract, plus an in-memory implementation.

use crate::error::{MetadataError, Result};
use crate::types::{FieldName, ScrapedFields};
use std::cell::Cell;
use std::collections::HashMap;

/// Source of scraped movie metadata.
///
/// Implementations report "N/A" for any field they cannot locate. An `Err` is
/// reserved for total failure (no page for this id), and callers treat it as
/// "no data for this movie".
pub trait MetadataProvider {
    /// Returns the name of this provider (for logging)
    fn name(&self) -> &str;

    /// Fetch `fields` for the movie with IMDb id `external_id` (e.g. "tt0114709").
    ///
    /// Fields not listed in `fields` may be left as "N/A".
    fn get_fields(&self, external_id: &str, fields: &[FieldName]) -> Result<ScrapedFields>;
}

/// Provider backed by a fixed map; ids not in the map are unavailable.
///
/// Counts the lookups it serves so callers can check how many round-trips a
/// query would cost against a real site.
#[derive(Debug, Default)]
pub struct StaticProvider {
    entries: HashMap<String, ScrapedFields>,
    calls: Cell<usize>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the page content for `external_id` (builder pattern)
    pub fn with_entry(mut self, external_id: impl Into<String>, fields: ScrapedFields) -> Self {
        self.entries.insert(external_id.into(), fields);
        self
    }

    /// Number of `get_fields` calls served so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MetadataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn get_fields(&self, external_id: &str, fields: &[FieldName]) -> Result<ScrapedFields> {
        self.calls.set(self.calls.get() + 1);
        self.entries
            .get(external_id)
            .map(|entry| entry.project(fields))
            .ok_or_else(|| MetadataError::ProviderUnavailable {
                id: external_id.to_string(),
                reason: "no entry".to_string(),
            })
    }
}
