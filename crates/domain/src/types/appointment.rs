//! Appointment payload and row types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::types::service::{Service, ServiceEntry};
use crate::types::user::User;

/// Appointment record.
///
/// The same shape is used for save payloads and stored rows: a payload has
/// `id: None` until persisted, and the generated fields (`hash`,
/// `book_datetime`, create/update stamps) are filled in by the store.
/// Date-time fields hold canonical `YYYY-MM-DD HH:MM:SS` text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Option<i64>,
    pub book_datetime: Option<String>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
    pub location: Option<String>,
    pub color: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    /// Opaque public confirmation token, generated once at creation.
    pub hash: Option<String>,
    pub provider_id: Option<i64>,
    pub customer_id: Option<i64>,
    /// Primary service id (first line item for multi-service bookings).
    pub service_id: Option<i64>,
    /// Sum of resolved line-item durations in minutes.
    pub total_duration: Option<i64>,
    /// Sum of resolved line-item prices.
    pub total_price: Option<f64>,
    pub is_unavailability: bool,
    pub google_calendar_id: Option<String>,
    pub caldav_calendar_id: Option<String>,
    pub create_datetime: Option<String>,
    pub update_datetime: Option<String>,
    /// Raw requested services, resolved by the normalizer before persistence.
    /// Never populated on rows read back from the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ServiceEntry>>,
}

impl Appointment {
    /// Whether the payload targets a new record (no persisted id yet).
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// Relation names accepted by the load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Service,
    Provider,
    Customer,
}

impl FromStr for Relation {
    type Err = BookingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "service" => Ok(Self::Service),
            "provider" => Ok(Self::Provider),
            "customer" => Ok(Self::Customer),
            other => Err(BookingError::InvalidInput(format!(
                "the requested appointment relation is not supported: {other}"
            ))),
        }
    }
}

/// An appointment together with its loaded related records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub service: Option<Service>,
    pub provider: Option<User>,
    pub customer: Option<User>,
}
