//! # Analytics Crate
//!
//! Aggregation queries over the MovieLens tables: rating distributions and
//! per-movie / per-user statistics, tag rankings, and rankings over scraped
//! metadata for linked movies.
//!
//! ## Components
//!
//! - **ratings**: `RatingsAnalytics` (by year, by value, top-N by count,
//!   average, median, variance)
//! - **tags**: `TagAnalytics` (word count, length, frequency, search)
//! - **links**: `LinkedMovieAnalytics` (directors, budget, profit, runtime,
//!   cost per minute) over any `MetadataProvider`
//! - **scraped**: parsing scraped budget / gross / runtime text into numbers
//! - **stats**: `Metric` and the statistics behind it
//! - **dataset**: loading all four tables at once
//!
//! Every ranking is a `Vec` of (key, value) pairs, highest value first, with
//! ties in the order the keys were first seen.
//!
//! ## Example Usage
//!
//! ```ignore
//! use analytics::{Dataset, Entity, Metric};
//! use data_loader::DataPaths;
//!
//! let dataset = Dataset::load(&DataPaths::from_dir("data"));
//! let top = dataset.ratings.top_by_metric(10, Metric::Average, Entity::Movie)?;
//! for (title, average) in top {
//!     println!("{title}: {average}");
//! }
//! ```

pub mod error;
pub mod stats;
pub mod scraped;
pub mod ratings;
pub mod tags;
pub mod links;
pub mod dataset;

pub use error::{AnalyticsError, Result};
pub use stats::Metric;
pub use ratings::{Entity, RatingsAnalytics};
pub use tags::TagAnalytics;
pub use links::{LinkedMovieAnalytics, MetadataRow};
pub use dataset::Dataset;
