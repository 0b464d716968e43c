//! Date-time parsing and canonical formatting
//!
//! Stored values always use the canonical `YYYY-MM-DD HH:MM:SS` layout so
//! lexicographic comparison in storage matches chronological order. Input
//! additionally accepts the ISO `T` separator.

use chrono::NaiveDateTime;

use crate::constants::{DATETIME_FORMAT, DATETIME_FORMAT_T};

/// Parse a payload date-time, accepting the canonical and `T`-separated
/// layouts. Returns `None` for anything else.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATETIME_FORMAT_T))
        .ok()
}

/// Format a date-time in the canonical stored layout.
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}
