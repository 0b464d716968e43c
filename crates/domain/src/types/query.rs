//! Appointment listing query types

use serde::{Deserialize, Serialize};

/// Columns accepted for ordering listing results.
///
/// Restricting ordering to a fixed set keeps user-supplied sort input out of
/// generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    BookDatetime,
    StartDatetime,
    EndDatetime,
}

impl SortColumn {
    /// Storage column name.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::BookDatetime => "book_datetime",
            Self::StartDatetime => "start_datetime",
            Self::EndDatetime => "end_datetime",
        }
    }
}

/// Ordering for listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub column: SortColumn,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(column: SortColumn) -> Self {
        Self { column, descending: false }
    }

    pub fn descending(column: SortColumn) -> Self {
        Self { column, descending: true }
    }
}

/// Filter criteria for the appointment listing read path.
///
/// All criteria are optional and combined with `AND`; unavailability blocks
/// are always excluded from listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub provider_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub service_id: Option<i64>,
    /// Keep appointments starting at or after this canonical date-time text.
    pub start_from: Option<String>,
    /// Keep appointments ending at or before this canonical date-time text.
    pub end_until: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order_by: Option<SortOrder>,
}
