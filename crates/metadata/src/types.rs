//! Field names and the scraped values returned for them.

use crate::error::MetadataError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Value reported for a field the provider could not find
pub const NOT_AVAILABLE: &str = "N/A";

/// A piece of metadata a provider can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldName {
    Director,
    Budget,
    CumulativeWorldwideGross,
    Runtime,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::Director,
        FieldName::Budget,
        FieldName::CumulativeWorldwideGross,
        FieldName::Runtime,
    ];

    /// Name as shown on the movie page, lower-cased
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Director => "director",
            FieldName::Budget => "budget",
            FieldName::CumulativeWorldwideGross => "cumulative worldwide gross",
            FieldName::Runtime => "runtime",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = MetadataError;

    /// Case-insensitive; "gross" is accepted for the worldwide gross.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "director" => Ok(FieldName::Director),
            "budget" => Ok(FieldName::Budget),
            "cumulative worldwide gross" | "gross" => Ok(FieldName::CumulativeWorldwideGross),
            "runtime" => Ok(FieldName::Runtime),
            _ => Err(MetadataError::UnknownField(s.to_string())),
        }
    }
}

/// Raw text scraped for one movie.
///
/// Every field holds the page text verbatim or "N/A". Nothing is parsed here;
/// turning "$30,000,000 (estimated)" into a number is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapedFields {
    pub director: String,
    pub budget: String,
    pub gross: String,
    pub runtime: String,
}

impl ScrapedFields {
    /// Text for `field`
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Director => &self.director,
            FieldName::Budget => &self.budget,
            FieldName::CumulativeWorldwideGross => &self.gross,
            FieldName::Runtime => &self.runtime,
        }
    }

    /// Store `value` under `field`
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Director => &mut self.director,
            FieldName::Budget => &mut self.budget,
            FieldName::CumulativeWorldwideGross => &mut self.gross,
            FieldName::Runtime => &mut self.runtime,
        };
        *slot = value.into();
    }

    /// Builder-style `set`
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Copy of `self` keeping only `fields`; the rest become "N/A"
    pub fn project(&self, fields: &[FieldName]) -> Self {
        fields
            .iter()
            .fold(Self::default(), |acc, &field| acc.with(field, self.get(field)))
    }
}

impl Default for ScrapedFields {
    fn default() -> Self {
        Self {
            director: NOT_AVAILABLE.to_string(),
            budget: NOT_AVAILABLE.to_string(),
            gross: NOT_AVAILABLE.to_string(),
            runtime: NOT_AVAILABLE.to_string(),
        }
    }
}

/// External identifier used by IMDb: `tt` plus the number padded to 7 digits.
///
/// Example: "114709" -> "tt0114709"
pub fn external_id(imdb_id: &str) -> String {
    format!("tt{:0>7}", imdb_id.trim())
}
