//! Locations of the four input tables.

use std::path::{Path, PathBuf};

/// Directory the tables are read from unless told otherwise
pub const DEFAULT_DATA_DIR: &str = "data";

/// Paths of links.csv, movies.csv, ratings.csv and tags.csv.
///
/// Built from a directory with the standard file names; any single file can
/// then be pointed elsewhere with the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub links: PathBuf,
    pub movies: PathBuf,
    pub ratings: PathBuf,
    pub tags: PathBuf,
}

impl DataPaths {
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            links: dir.join("links.csv"),
            movies: dir.join("movies.csv"),
            ratings: dir.join("ratings.csv"),
            tags: dir.join("tags.csv"),
        }
    }

    pub fn with_links(mut self, path: impl Into<PathBuf>) -> Self {
        self.links = path.into();
        self
    }

    pub fn with_movies(mut self, path: impl Into<PathBuf>) -> Self {
        self.movies = path.into();
        self
    }

    pub fn with_ratings(mut self, path: impl Into<PathBuf>) -> Self {
        self.ratings = path.into();
        self
    }

    pub fn with_tags(mut self, path: impl Into<PathBuf>) -> Self {
        self.tags = path.into();
        self
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::from_dir(DEFAULT_DATA_DIR)
    }
}
