//! Statistics over a sample of rating values.
//!
//! Values are computed at full precision; rounding to two decimals happens
//! only when a ranking is reported.

use crate::error::{AnalyticsError, Result};
use std::fmt;
use std::str::FromStr;

/// Statistic used to rank a group of ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Average,
    Median,
    Variance,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Average => "average",
            Metric::Median => "median",
            Metric::Variance => "variance",
        }
    }

    /// Compute this metric over `values`
    pub fn compute(&self, values: &[f64]) -> Result<f64> {
        match self {
            Metric::Average => average(values),
            Metric::Median => median(values),
            Metric::Variance => variance(values),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "average" => Ok(Metric::Average),
            "median" => Ok(Metric::Median),
            "variance" => Ok(Metric::Variance),
            _ => Err(AnalyticsError::InvalidArgument(format!(
                "unknown metric '{}'",
                s
            ))),
        }
    }
}

/// Arithmetic mean
pub fn average(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptyGroup { metric: "average" });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value; mean of the two middle values for an even count
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptyGroup { metric: "median" });
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Population variance: mean squared deviation, divided by the count
pub fn variance(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptyGroup { metric: "variance" });
    }
    let mean = average(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(squares / values.len() as f64)
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
