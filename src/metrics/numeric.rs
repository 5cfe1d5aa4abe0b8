//! Time and numeric helpers shared by the extractors and the aggregator.
//!
//! Rounding is half away from zero everywhere (`f64::round`), so `average([10.0, 21.0])`
//! is 16 and a ratio of 0.125 is 13 percent.

use super::Measure;
use chrono::{DateTime, Utc};

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// Fractional days from `from` to `to`. Negative when `to` precedes `from`.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "millisecond spans of realistic dates fit in an f64 mantissa")]
pub fn duration_to_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLISECONDS_PER_DAY
}

/// Convert a ratio to a whole percentage.
///
/// Callers must guard against zero denominators themselves; see [`percentage_of`].
#[must_use]
#[expect(clippy::cast_possible_truncation, reason = "value is rounded first")]
pub fn to_percentage(ratio: f64) -> i64 {
    (ratio * 100.0).round() as i64
}

/// `numerator / denominator` as a whole percentage, or N/A when the denominator is zero.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
pub fn percentage_of(numerator: u64, denominator: u64) -> Measure {
    if denominator == 0 {
        return Measure::NotApplicable;
    }

    Measure::Value(to_percentage(numerator as f64 / denominator as f64))
}

#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

/// Rounded mean of `values`, or N/A for an empty list.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "sample counts are far below 2^52")]
#[expect(clippy::cast_possible_truncation, reason = "value is rounded first")]
pub fn average(values: &[f64]) -> Measure {
    if values.is_empty() {
        return Measure::NotApplicable;
    }

    Measure::Value((sum(values) / values.len() as f64).round() as i64)
}

/// Flatten one level of nesting. No input lists yields an empty list.
#[must_use]
pub fn concatenate<'a, T: Clone + 'a>(lists: impl IntoIterator<Item = &'a [T]>) -> Vec<T> {
    lists.into_iter().fold(Vec::new(), |mut acc, list| {
        acc.extend_from_slice(list);
        acc
    })
}
