// SPDX-License-Identifier: MIT

//! Input parsing rules for dates and durations.
//!
//! Request bodies arrive as JSON where clients habitually send numbers as
//! strings, so the scalar fields accept either form and the rules here do
//! the coercion.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

/// A JSON scalar that may be a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonScalar {
    Number(f64),
    String(String),
}

/// Parse a `from`/`to` query date: `YYYY-MM-DD` (taken as UTC midnight)
/// or a full RFC3339 timestamp.
pub fn parse_query_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Utc
            .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
            .single();
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an exercise date from a request body.
///
/// Omitted means "now". A number is an epoch-milliseconds timestamp. A
/// string containing a run of five or more digits is read in full as
/// epoch milliseconds; anything else is parsed as a date string.
pub fn parse_exercise_date(value: Option<&JsonScalar>) -> Option<DateTime<Utc>> {
    match value {
        None => Some(Utc::now()),
        Some(JsonScalar::Number(n)) => {
            if !n.is_finite() {
                return None;
            }
            Utc.timestamp_millis_opt(*n as i64).single()
        }
        Some(JsonScalar::String(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            if looks_like_epoch_millis(raw) {
                let millis = raw.parse::<i64>().ok()?;
                return Utc.timestamp_millis_opt(millis).single();
            }
            parse_query_date(raw)
        }
    }
}

/// Parse an exercise duration: a positive number of minutes, given as a
/// JSON number or a numeric string. Fractional minutes are allowed.
pub fn parse_duration(value: Option<&JsonScalar>) -> Option<f64> {
    let n = match value {
        None => return None,
        Some(JsonScalar::Number(n)) => *n,
        Some(JsonScalar::String(raw)) => raw.trim().parse::<f64>().ok()?,
    };

    if n.is_finite() && n > 0.0 {
        Some(n)
    } else {
        None
    }
}

/// A run of five or more consecutive ASCII digits marks a numeric
/// timestamp: no plain calendar date format contains one.
fn looks_like_epoch_millis(raw: &str) -> bool {
    let mut run = 0;
    for c in raw.chars() {
        if c.is_ascii_digit() {
            run += 1;
            if run >= 5 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
