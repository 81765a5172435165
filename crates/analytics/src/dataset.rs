//! All four tables, loaded together.

use crate::links::LinkedMovieAnalytics;
use crate::ratings::RatingsAnalytics;
use crate::tags::TagAnalytics;
use data_loader::parser::{self, load_or_empty};
use data_loader::{DataPaths, Link, MovieCatalog};
use metadata::MetadataProvider;
use std::time::Instant;
use tracing::{info, instrument};

/// The catalog, the links rows and the ratings and tag components built
/// from one set of files
pub struct Dataset {
    pub catalog: MovieCatalog,
    pub links: Vec<Link>,
    pub ratings: RatingsAnalytics,
    pub tags: TagAnalytics,
}

impl Dataset {
    /// Read the four files in parallel.
    ///
    /// Each file fails on its own: a missing or unreadable table is logged
    /// and comes back empty, the others still load.
    #[instrument(skip(paths))]
    pub fn load(paths: &DataPaths) -> Self {
        let start = Instant::now();

        let ((links, movies), (ratings, tags)) = rayon::join(
            || {
                rayon::join(
                    || load_or_empty(&paths.links, parser::parse_links),
                    || load_or_empty(&paths.movies, parser::parse_movies),
                )
            },
            || {
                rayon::join(
                    || load_or_empty(&paths.ratings, parser::parse_ratings),
                    || load_or_empty(&paths.tags, parser::parse_tags),
                )
            },
        );

        let catalog = MovieCatalog::from_movies(movies);

        info!(
            "Loaded {} links, {} movies, {} ratings, {} tags in {:?}",
            links.len(),
            catalog.len(),
            ratings.len(),
            tags.len(),
            start.elapsed()
        );

        Self {
            ratings: RatingsAnalytics::new(ratings, catalog.clone()),
            tags: TagAnalytics::new(tags),
            catalog,
            links,
        }
    }

    /// Linked-movie queries over this dataset, answered by `provider`
    pub fn linked<P: MetadataProvider>(&self, provider: P) -> LinkedMovieAnalytics<P> {
        LinkedMovieAnalytics::new(self.links.clone(), self.catalog.clone(), provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_tolerates_missing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("movies.csv"),
            "movieId,title,genres\n1,Toy Story (1995),Animation|Comedy\n",
        )
        .unwrap();

        let dataset = Dataset::load(&DataPaths::from_dir(dir.path()));

        assert_eq!(dataset.catalog.len(), 1);
        assert!(dataset.links.is_empty());
        assert!(dataset.ratings.ratings().is_empty());
        assert!(dataset.tags.distinct_tags().is_empty());
    }
}
