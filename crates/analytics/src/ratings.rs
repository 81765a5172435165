//! RatingsAnalytics: distributions and per-movie / per-user statistics.
//!
//! ## Grouping
//! Every per-entity query goes through one grouping function that takes a
//! key-extraction closure: for movies the key is the title resolved through
//! the catalog (unknown movie ids are dropped), for users it is the raw user
//! id. Groups keep the order in which their key first appeared, so equal
//! values in a ranking keep file order.

use crate::error::{AnalyticsError, Result};
use crate::stats::{round2, Metric};
use chrono::{Datelike, Local, TimeZone};
use data_loader::ranking::top_n_desc;
use data_loader::{parser, MovieCatalog, Rating};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// What the ratings are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Group by movie title
    Movie,
    /// Group by user id
    User,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Movie => f.write_str("movie"),
            Entity::User => f.write_str("user"),
        }
    }
}

impl FromStr for Entity {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Entity::Movie),
            "user" => Ok(Entity::User),
            _ => Err(AnalyticsError::InvalidArgument(format!(
                "unknown entity '{}'",
                s
            ))),
        }
    }
}

pub struct RatingsAnalytics {
    ratings: Vec<Rating>,
    catalog: MovieCatalog,
}

impl RatingsAnalytics {
    pub fn new(ratings: Vec<Rating>, catalog: MovieCatalog) -> Self {
        Self { ratings, catalog }
    }

    /// Load ratings.csv and build a catalog from movies.csv.
    ///
    /// An unreadable ratings file gives an analytics object with no ratings.
    pub fn load(ratings_path: &Path, movies_path: &Path) -> Self {
        let ratings = parser::load_or_empty(ratings_path, parser::parse_ratings);
        Self::new(ratings, MovieCatalog::load(movies_path))
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Number of ratings per calendar year (local time), oldest year first
    pub fn distribution_by_year(&self) -> Vec<(i32, usize)> {
        let mut years: BTreeMap<i32, usize> = BTreeMap::new();
        for rating in &self.ratings {
            if let Some(year) = local_year(rating.timestamp) {
                *years.entry(year).or_insert(0) += 1;
            }
        }
        years.into_iter().collect()
    }

    /// Number of ratings per rating value, lowest value first
    pub fn distribution_by_rating_value(&self) -> Vec<(f64, usize)> {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for rating in &self.ratings {
            *counts.entry(rating.rating.to_bits()).or_insert(0) += 1;
        }

        let mut values: Vec<(f64, usize)> = counts
            .into_iter()
            .map(|(bits, count)| (f64::from_bits(bits), count))
            .collect();
        values.sort_by(|a, b| a.0.total_cmp(&b.0));
        values
    }

    /// Movies (by title) or users with the most ratings
    pub fn top_by_rating_count(&self, n: usize, entity: Entity) -> Vec<(String, usize)> {
        let groups = self.group_by_entity(entity);
        let counts = groups
            .into_iter()
            .map(|(key, values)| (key.to_string(), values.len()))
            .collect();
        top_n_desc(counts, n)
    }

    /// Movies or users ranked by `metric` of their ratings, rounded to 2 decimals
    pub fn top_by_metric(
        &self,
        n: usize,
        metric: Metric,
        entity: Entity,
    ) -> Result<Vec<(String, f64)>> {
        let groups = self.group_by_entity(entity);
        let scored = groups
            .into_iter()
            .map(|(key, values)| -> Result<(String, f64)> {
                Ok((key.to_string(), round2(metric.compute(&values)?)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(top_n_desc(scored, n))
    }

    /// Movies or users whose ratings vary the most
    pub fn top_controversial(&self, n: usize, entity: Entity) -> Result<Vec<(String, f64)>> {
        self.top_by_metric(n, Metric::Variance, entity)
    }

    fn group_by_entity(&self, entity: Entity) -> IndexMap<&str, Vec<f64>> {
        match entity {
            Entity::Movie => self.group_by(|r| self.catalog.title_of(&r.movie_id)),
            Entity::User => self.group_by(|r| Some(r.user_id.as_str())),
        }
    }

    /// Collect rating values under the key `key_of` extracts; `None` drops the rating
    fn group_by<'a, F>(&'a self, key_of: F) -> IndexMap<&'a str, Vec<f64>>
    where
        F: Fn(&'a Rating) -> Option<&'a str>,
    {
        let mut groups: IndexMap<&'a str, Vec<f64>> = IndexMap::new();
        for rating in &self.ratings {
            if let Some(key) = key_of(rating) {
                groups.entry(key).or_default().push(rating.rating);
            }
        }
        groups
    }
}

fn local_year(timestamp: i64) -> Option<i32> {
    Local
        .timestamp_opt(timestamp, 0)
        .earliest()
        .map(|dt| dt.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Movie;

    fn rating(user: &str, movie: &str, value: f64, timestamp: i64) -> Rating {
        Rating {
            user_id: user.to_string(),
            movie_id: movie.to_string(),
            rating: value,
            timestamp,
        }
    }

    fn create_test_analytics() -> RatingsAnalytics {
        let catalog = MovieCatalog::from_movies(vec![
            Movie {
                id: "1".to_string(),
                title: "Toy Story (1995)".to_string(),
                genres: vec!["Animation".to_string()],
            },
            Movie {
                id: "2".to_string(),
                title: "Jumanji (1995)".to_string(),
                genres: vec!["Adventure".to_string()],
            },
        ]);

        // Mid-year timestamps so the local year is the same in every zone.
        let y2000 = 962_000_000; // 2000-06-26
        let y2005 = 1_120_000_000; // 2005-06-28
        let ratings = vec![
            rating("1", "1", 4.0, y2005),
            rating("1", "2", 3.5, y2000),
            rating("2", "1", 5.0, y2000),
            rating("2", "2", 1.0, y2005),
            rating("3", "1", 4.0, y2000),
            rating("3", "99", 0.5, y2005),
        ];
        RatingsAnalytics::new(ratings, catalog)
    }

    #[test]
    fn test_distribution_by_year() {
        let analytics = create_test_analytics();
        assert_eq!(analytics.distribution_by_year(), vec![(2000, 3), (2005, 3)]);
    }

    #[test]
    fn test_distribution_by_rating_value_ascending() {
        let analytics = create_test_analytics();
        let dist = analytics.distribution_by_rating_value();

        assert_eq!(
            dist,
            vec![(0.5, 1), (1.0, 1), (3.5, 1), (4.0, 2), (5.0, 1)]
        );
    }

    #[test]
    fn test_top_by_rating_count_drops_unknown_movies() {
        let analytics = create_test_analytics();

        let movies = analytics.top_by_rating_count(10, Entity::Movie);
        assert_eq!(
            movies,
            vec![
                ("Toy Story (1995)".to_string(), 3),
                ("Jumanji (1995)".to_string(), 2),
            ]
        );

        let users = analytics.top_by_rating_count(10, Entity::User);
        assert_eq!(users.len(), 3);
        assert!(users.iter().all(|(_, count)| *count == 2));
    }

    #[test]
    fn test_top_by_metric() {
        let analytics = create_test_analytics();

        let average = analytics.top_by_metric(10, Metric::Average, Entity::Movie).unwrap();
        assert_eq!(
            average,
            vec![
                ("Toy Story (1995)".to_string(), 4.33),
                ("Jumanji (1995)".to_string(), 2.25),
            ]
        );

        let median = analytics.top_by_metric(1, Metric::Median, Entity::User).unwrap();
        assert_eq!(median, vec![("1".to_string(), 3.75)]);
    }

    #[test]
    fn test_top_controversial() {
        let analytics = create_test_analytics();
        let top = analytics.top_controversial(10, Entity::User).unwrap();

        // user 2: [5.0, 1.0] -> 4.0, user 3: [4.0, 0.5] -> 3.06, user 1: [4.0, 3.5] -> 0.06
        assert_eq!(
            top,
            vec![
                ("2".to_string(), 4.0),
                ("3".to_string(), 3.06),
                ("1".to_string(), 0.06),
            ]
        );
    }

    #[test]
    fn test_zero_n_is_empty() {
        let analytics = create_test_analytics();
        assert!(analytics.top_by_rating_count(0, Entity::User).is_empty());
        assert!(analytics
            .top_by_metric(0, Metric::Average, Entity::Movie)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_entity_parse() {
        assert_eq!("movie".parse::<Entity>().unwrap(), Entity::Movie);
        assert!(matches!(
            "genre".parse::<Entity>(),
            Err(AnalyticsError::InvalidArgument(_))
        ));
    }
}
