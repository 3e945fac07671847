// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// Used as the stored representation of exercise dates: the output is fixed
/// width, so lexicographic ordering in store queries matches chronological
/// ordering.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a UTC timestamp as a human-readable calendar date,
/// e.g. `Thu Jan 05 2023`.
pub fn format_date_string(date: DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}
