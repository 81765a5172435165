//! Error types for metadata providers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    /// The provider could not produce a page for this movie at all
    #[error("Metadata unavailable for {id}: {reason}")]
    ProviderUnavailable { id: String, reason: String },

    /// Transport-level failure talking to the remote site
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A field name that no provider understands
    #[error("Unknown metadata field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
