//! Time window used by the conflict detector

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::DATETIME_FORMAT;

/// Half-open candidate window `[start, end)` compared against existing
/// bookings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Window start in canonical stored-text form.
    pub fn start_text(&self) -> String {
        self.start.format(DATETIME_FORMAT).to_string()
    }

    /// Window end in canonical stored-text form.
    pub fn end_text(&self) -> String {
        self.end.format(DATETIME_FORMAT).to_string()
    }
}
