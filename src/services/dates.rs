//! Posting date parsing.
//!
//! Boards report dates in whatever shape they like. Only full ISO 8601 dates
//! are accepted; anything else is treated as "no date" rather than guessed.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::Job;

/// Naive date-time layouts tried after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts RFC 3339 parsing does not cover.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Parse the posting date of a job.
///
/// Uses `posted_date`, falling back to `date` when that is missing or blank.
pub fn parse_date(job: &Job) -> Option<NaiveDateTime> {
    [&job.posted_date, &job.date]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .and_then(parse_date_str)
}

/// Parse a single date string. Any timezone offset is dropped and the
/// wall-clock time kept.
pub fn parse_date_str(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
