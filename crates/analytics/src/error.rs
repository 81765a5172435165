//! Error types for the analytics crate.
//!
//! I/O and provider failures never reach these queries' callers: they are
//! logged where the table or the metadata is loaded and turn into empty
//! results. What remains are programmer errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Statistic requested over zero values
    #[error("Cannot compute {metric} of an empty group")]
    EmptyGroup { metric: &'static str },

    /// Unknown metric or entity name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
