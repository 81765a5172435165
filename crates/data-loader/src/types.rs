//! Core row types for the MovieLens CSV tables.
//!
//! Identifiers stay as the text found in the files; nothing downstream does
//! arithmetic on them, and the links table is joined against the movies table
//! by exact string equality.

use serde::Serialize;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a user, as written in ratings.csv / tags.csv
pub type UserId = String;

/// Identifier of a movie, as written in every table
pub type MovieId = String;

/// One CSV line split into its logical fields
pub type Row = Vec<String>;

// =============================================================================
// Movie
// =============================================================================

/// Represents a movie from movies.csv
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    /// Title including the release year, e.g. "Toy Story (1995)"
    pub title: String,
    /// Raw `|`-separated genre tokens, unmodified
    pub genres: Vec<String>,
}

impl Movie {
    /// Release year read from the title.
    ///
    /// The year is the four characters right before the last `)`.
    /// Returns `None` unless all four are ASCII digits.
    ///
    /// Example: "Toy Story (1995)" -> Some("1995")
    ///          "Babylon 5" -> None
    pub fn release_year(&self) -> Option<&str> {
        let close = self.title.rfind(')')?;
        let start = close.checked_sub(4)?;
        let year = self.title.get(start..close)?;
        year.bytes().all(|b| b.is_ascii_digit()).then_some(year)
    }
}

// =============================================================================
// Link
// =============================================================================

/// Represents a row of links.csv
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub movie_id: MovieId,
    /// IMDb number without the `tt` prefix and possibly without zero padding
    pub imdb_id: String,
    pub tmdb_id: String,
}

// =============================================================================
// Rating
// =============================================================================

/// Represents a single rating from a user for a movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value, 0.5 to 5.0 in half steps
    pub rating: f64,
    /// Unix timestamp when rating was made
    pub timestamp: i64,
}

// =============================================================================
// Tag
// =============================================================================

/// Represents a row of tags.csv
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Tag text, trimmed
    pub tag: String,
    /// `None` when the timestamp field was not a number
    pub timestamp: Option<i64>,
}
