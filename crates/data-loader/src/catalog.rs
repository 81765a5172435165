//! MovieCatalog: the movies table and the queries that only need it.
//!
//! The catalog owns its movies plus an id -> title index. Other components
//! that resolve ids to titles build their own catalog from movies.csv instead
//! of sharing one.

use crate::parser;
use crate::ranking::top_n_desc;
use crate::types::*;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
    titles: HashMap<MovieId, String>,
}

impl MovieCatalog {
    /// Build a catalog from parsed movies
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let titles = movies
            .iter()
            .map(|movie| (movie.id.clone(), movie.title.clone()))
            .collect();
        Self { movies, titles }
    }

    /// Load movies.csv; an unreadable file gives an empty catalog.
    pub fn load(path: &Path) -> Self {
        Self::from_movies(parser::load_or_empty(path, parser::parse_movies))
    }

    /// Title for a movie id, if the id is known
    pub fn title_of(&self, id: &str) -> Option<&str> {
        self.titles.get(id).map(|title| title.as_str())
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    /// Number of movies per release year.
    ///
    /// Movies without a 4-digit year in the title are left out. Sorted by
    /// count descending, then by year descending.
    pub fn distribution_by_release_year(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for year in self.movies.iter().filter_map(Movie::release_year) {
            *counts.entry(year).or_insert(0) += 1;
        }

        let mut years: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(year, count)| (year.to_string(), count))
            .collect();
        // Years are always four digits, so string order is numeric order.
        years.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        years
    }

    /// Number of movies per genre, most common first.
    ///
    /// Tokens lose any stray comma and are title-cased before counting.
    /// Genres with equal counts stay in first-seen order.
    pub fn distribution_by_genre(&self) -> Vec<(String, usize)> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for genre in self.movies.iter().flat_map(|movie| &movie.genres) {
            *counts.entry(title_case(&genre.replace(',', ""))).or_insert(0) += 1;
        }
        top_n_desc(counts.into_iter().collect(), usize::MAX)
    }

    /// Movies with the most genres, keyed by title.
    ///
    /// A title seen twice keeps the genre count of its last row.
    pub fn top_by_genre_count(&self, n: usize) -> Vec<(String, usize)> {
        let mut genre_counts: IndexMap<&str, usize> = IndexMap::new();
        for movie in &self.movies {
            genre_counts.insert(&movie.title, movie.genres.len());
        }
        let entries = genre_counts
            .into_iter()
            .map(|(title, count)| (title.to_string(), count))
            .collect();
        top_n_desc(entries, n)
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
///
/// Example: "sci-fi" -> "Sci-Fi", "(no genres listed)" -> "(No Genres Listed)"
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        in_word = ch.is_alphabetic();
    }
    out
}
