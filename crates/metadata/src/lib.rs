//! # Metadata Crate
//!
//! Scraped movie metadata (director, budget, worldwide gross, runtime) behind
//! a narrow provider contract.
//!
//! ## Components
//!
//! - **provider**: the `MetadataProvider` trait and `StaticProvider`, an
//!   in-memory implementation for tests and offline runs
//! - **imdb**: `ImdbProvider`, which fetches IMDb title pages over HTTP and
//!   reads fields out of them with CSS selectors
//! - **types**: `FieldName`, `ScrapedFields`, external id formatting
//!
//! Values come back as the raw text shown on the page ("$30,000,000
//! (estimated)", "1h 21m") or "N/A". Parsing them into numbers happens in the
//! analytics crate.
//!
//! ## Example Usage
//!
//! ```ignore
//! use metadata::{external_id, FieldName, ImdbProvider, MetadataProvider};
//!
//! let provider = ImdbProvider::new()?;
//! let fields = provider.get_fields(&external_id("114709"), &[FieldName::Director])?;
//! println!("{}", fields.director);
//! ```

pub mod error;
pub mod types;
pub mod provider;
pub mod imdb;

pub use error::{MetadataError, Result};
pub use types::{external_id, FieldName, ScrapedFields, NOT_AVAILABLE};
pub use provider::{MetadataProvider, StaticProvider};
pub use imdb::{ImdbConfig, ImdbProvider};
