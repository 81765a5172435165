//! LinkedMovieAnalytics: rankings over scraped metadata.
//!
//! Each query walks the links table, asks the provider for the fields it
//! needs and turns the returned text into numbers with [`crate::scraped`].
//! Provider calls are blocking and sequential, one per linked movie.

use crate::scraped;
use data_loader::ranking::top_n_desc;
use data_loader::{parser, DataPaths, Link, MovieCatalog, MovieId};
use indexmap::IndexMap;
use metadata::{external_id, FieldName, MetadataProvider, NOT_AVAILABLE};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info, instrument, warn};

/// Scraped values for one movie, in the order the fields were requested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRow {
    pub movie_id: MovieId,
    pub values: Vec<String>,
}

pub struct LinkedMovieAnalytics<P: MetadataProvider> {
    links: Vec<Link>,
    catalog: MovieCatalog,
    provider: P,
}

impl<P: MetadataProvider> LinkedMovieAnalytics<P> {
    pub fn new(links: Vec<Link>, catalog: MovieCatalog, provider: P) -> Self {
        Self {
            links,
            catalog,
            provider,
        }
    }

    /// Load links.csv and movies.csv from `paths`.
    ///
    /// An unreadable links file gives an analytics object with no links.
    pub fn load(paths: &DataPaths, provider: P) -> Self {
        let links = parser::load_or_empty(&paths.links, parser::parse_links);
        Self::new(links, MovieCatalog::load(&paths.movies), provider)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Scrape `fields` for every link with an IMDb id.
    ///
    /// Movies the provider cannot serve are left out. Rows are sorted by
    /// movie id, highest first; ids that are not numbers come last.
    #[instrument(skip(self, links, fields), fields(provider = self.provider.name()))]
    pub fn fetch_metadata_fields(&self, links: &[Link], fields: &[FieldName]) -> Vec<MetadataRow> {
        let linked: Vec<&Link> = links.iter().filter(|l| !l.imdb_id.is_empty()).collect();
        info!(
            "Fetching {} field(s) for {} movies from {}",
            fields.len(),
            linked.len(),
            self.provider.name()
        );

        let mut rows = Vec::with_capacity(linked.len());
        for link in linked {
            let id = external_id(&link.imdb_id);
            match self.provider.get_fields(&id, fields) {
                Ok(scraped) => rows.push(MetadataRow {
                    movie_id: link.movie_id.clone(),
                    values: fields.iter().map(|f| scraped.get(*f).to_string()).collect(),
                }),
                Err(e) => warn!("No metadata for movie {} ({}): {}", link.movie_id, id, e),
            }
        }

        rows.sort_by(|a, b| compare_movie_ids_desc(&a.movie_id, &b.movie_id));
        debug!("Fetched metadata for {} movies", rows.len());
        rows
    }

    /// Directors credited on the most linked movies
    pub fn top_directors(&self, n: usize) -> Vec<(String, usize)> {
        let rows = self.fetch_metadata_fields(&self.links, &[FieldName::Director]);

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for row in &rows {
            let director = row.values[0].as_str();
            if director.is_empty() || director == NOT_AVAILABLE {
                continue;
            }
            *counts.entry(director).or_insert(0) += 1;
        }
        let entries = counts
            .into_iter()
            .map(|(director, count)| (director.to_string(), count))
            .collect();
        top_n_desc(entries, n)
    }

    /// Highest estimated budgets, in dollars
    pub fn top_by_budget(&self, n: usize) -> Vec<(String, f64)> {
        self.top_movies(&[FieldName::Budget], n, |values| {
            Some(scraped::parse_budget(&values[0]))
        })
    }

    /// Highest worldwide gross minus budget
    pub fn top_by_profit(&self, n: usize) -> Vec<(String, f64)> {
        self.top_movies(
            &[FieldName::Budget, FieldName::CumulativeWorldwideGross],
            n,
            |values| Some(scraped::profit(&values[0], &values[1])),
        )
    }

    /// Longest runtimes, in minutes
    pub fn top_by_runtime(&self, n: usize) -> Vec<(String, u32)> {
        self.top_movies(&[FieldName::Runtime], n, |values| {
            Some(scraped::parse_runtime(&values[0]))
        })
    }

    /// Highest budget per minute of runtime; movies missing either are skipped
    pub fn top_by_cost_per_minute(&self, n: usize) -> Vec<(String, f64)> {
        self.top_movies(&[FieldName::Budget, FieldName::Runtime], n, |values| {
            scraped::cost_per_minute(&values[0], &values[1])
        })
    }

    /// Rank movies by title on a value computed from their scraped `fields`.
    ///
    /// Movies without a catalog title, or for which `value_of` gives `None`,
    /// are skipped. A title seen twice keeps the later value.
    fn top_movies<V, F>(&self, fields: &[FieldName], n: usize, value_of: F) -> Vec<(String, V)>
    where
        V: PartialOrd,
        F: Fn(&[String]) -> Option<V>,
    {
        let rows = self.fetch_metadata_fields(&self.links, fields);

        let mut by_title: IndexMap<&str, V> = IndexMap::new();
        for row in &rows {
            let Some(title) = self.catalog.title_of(&row.movie_id) else {
                debug!("Movie {} has no title in the catalog", row.movie_id);
                continue;
            };
            if let Some(value) = value_of(&row.values) {
                by_title.insert(title, value);
            }
        }
        let entries = by_title
            .into_iter()
            .map(|(title, value)| (title.to_string(), value))
            .collect();
        top_n_desc(entries, n)
    }
}

/// Numeric ids high to low, then non-numeric ids in text order
fn compare_movie_ids_desc(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => y.cmp(&x),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
