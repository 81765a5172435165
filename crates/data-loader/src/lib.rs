//! # Data Loader Crate
//!
//! This crate reads the MovieLens "latest-small" CSV tables and holds the
//! movies table as a queryable catalog.
//!
//! ## Main Components
//!
//! - **types**: Row types (Movie, Link, Rating, Tag)
//! - **parser**: Quote-aware CSV splitting and per-table loaders
//! - **catalog**: MovieCatalog (id -> title, release-year and genre queries)
//! - **ranking**: Stable top-N selection
//! - **config**: Where the four CSV files live
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DataPaths, MovieCatalog};
//!
//! let paths = DataPaths::from_dir("data");
//! let catalog = MovieCatalog::load(&paths.movies);
//!
//! println!("{:?}", catalog.title_of("1"));
//! for (year, count) in catalog.distribution_by_release_year().iter().take(5) {
//!     println!("{year}: {count}");
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod catalog;
pub mod ranking;
pub mod config;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    Row,
    // Core types
    Movie,
    Link,
    Rating,
    Tag,
};
pub use catalog::MovieCatalog;
pub use config::DataPaths;
pub use parser::Header;
