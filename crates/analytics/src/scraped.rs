//! Turning scraped page text into numbers.
//!
//! Every parser is total: text it does not understand becomes zero (or
//! `None` for cost per minute), never an error.

use crate::stats::round2;

/// Budget in dollars from text like "$30,000,000 (estimated)".
///
/// Only amounts carrying the "estimated" marker are read; any other text,
/// including a plain "$30,000,000", is 0.0.
pub fn parse_budget(text: &str) -> f64 {
    if !text.contains("estimated") {
        return 0.0;
    }
    let cleaned = text.replace("(estimated)", "").replace(['$', ','], "");
    cleaned.trim().parse().unwrap_or(0.0)
}

/// Gross in dollars from text like "$394,436,586"; unreadable text is 0.0.
pub fn parse_gross(text: &str) -> f64 {
    let cleaned = text.replace(['$', ','], "");
    cleaned.trim().parse().unwrap_or(0.0)
}

/// Runtime in minutes from text like "1h 35m", "1h" or "95".
///
/// A lone hour count ("2h") is hours. Otherwise all `h` and `m` characters
/// are dropped: two space-separated numbers are hours and minutes (a
/// non-numeric one counts as 0), a lone number is minutes, anything else is 0.
pub fn parse_runtime(text: &str) -> u32 {
    if let Some(hours) = text.trim().strip_suffix('h') {
        if !hours.is_empty() && hours.bytes().all(|b| b.is_ascii_digit()) {
            return digits_or_zero(hours).saturating_mul(60);
        }
    }

    let cleaned = text.replace(['h', 'm'], "");
    let cleaned = cleaned.trim();

    if cleaned.contains(' ') {
        let mut parts = cleaned.split(' ');
        let hours = parts.next().map(digits_or_zero).unwrap_or(0);
        let minutes = parts.next().map(digits_or_zero).unwrap_or(0);
        hours.saturating_mul(60).saturating_add(minutes)
    } else {
        digits_or_zero(cleaned)
    }
}

fn digits_or_zero(token: &str) -> u32 {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Worldwide gross minus budget; negative for a loss
pub fn profit(budget_text: &str, gross_text: &str) -> f64 {
    parse_gross(gross_text) - parse_budget(budget_text)
}

/// Budget per minute of runtime, rounded to cents.
///
/// `None` unless both the budget and the runtime are positive.
pub fn cost_per_minute(budget_text: &str, runtime_text: &str) -> Option<f64> {
    let budget = parse_budget(budget_text);
    let runtime = parse_runtime(runtime_text);
    (budget > 0.0 && runtime > 0).then(|| round2(budget / runtime as f64))
}
