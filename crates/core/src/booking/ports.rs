//! Port interfaces for the booking engine
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use slotbook_domain::{
    Appointment, AppointmentQuery, Result, Service, ServiceDefaults, ServiceLineItem, TimeWindow,
    User, UserRole,
};

/// Read-only access to the external service catalog.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// Fetch default duration/price for the given ids in one lookup.
    /// Unknown ids are simply absent from the returned map.
    async fn service_defaults(&self, service_ids: &[i64]) -> Result<HashMap<i64, ServiceDefaults>>;

    /// Whether a service id exists in the catalog.
    async fn service_exists(&self, service_id: i64) -> Result<bool>;

    /// Fetch a full catalog record, if present.
    async fn find_service(&self, service_id: i64) -> Result<Option<Service>>;
}

/// Read-only access to the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether the user exists and carries the given role.
    async fn user_has_role(&self, user_id: i64, role: UserRole) -> Result<bool>;

    /// Fetch a directory record, if present.
    async fn find_user(&self, user_id: i64) -> Result<Option<User>>;
}

/// Transactional appointment store.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Whether an appointment row exists.
    async fn exists(&self, appointment_id: i64) -> Result<bool>;

    /// Persist the appointment and its line items as one atomic unit of work.
    ///
    /// A payload without id inserts a new row, stamping book/create/update
    /// date-times and a fresh confirmation hash; a payload with id updates
    /// the row, refreshing only the update stamp. A non-empty `services`
    /// list replaces all existing line items (delete then ordered insert);
    /// an empty list leaves existing line items untouched. Any failure rolls
    /// back the entire transaction.
    async fn persist(
        &self,
        appointment: Appointment,
        services: Vec<ServiceLineItem>,
    ) -> Result<i64>;

    /// Fetch a single appointment row.
    async fn find(&self, appointment_id: i64) -> Result<Appointment>;

    /// List appointment rows matching the query (unavailability excluded).
    async fn get(&self, query: AppointmentQuery) -> Result<Vec<Appointment>>;

    /// Remove an appointment; line items cascade.
    async fn delete(&self, appointment_id: i64) -> Result<()>;

    /// Ordered line items for one appointment (by position).
    async fn services_for_appointment(&self, appointment_id: i64)
        -> Result<Vec<ServiceLineItem>>;

    /// Count bookings for the same service and provider overlapping the
    /// window, optionally excluding one appointment id.
    async fn attendants_for_period(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> Result<i64>;

    /// Count bookings for the same provider but a different service
    /// overlapping the window, optionally excluding one appointment id.
    async fn other_service_attendants(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> Result<i64>;

    /// Null out Google calendar sync ids for all of a provider's rows.
    async fn clear_google_sync_ids(&self, provider_id: i64) -> Result<()>;

    /// Null out CalDAV calendar sync ids for all of a provider's rows.
    async fn clear_caldav_sync_ids(&self, provider_id: i64) -> Result<()>;
}
