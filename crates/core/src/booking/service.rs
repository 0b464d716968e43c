//! Booking service - persistence coordination and read-side operations

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use serde_json::Value;
use slotbook_domain::{
    format_datetime, parse_datetime, Appointment, AppointmentDetails, AppointmentQuery,
    BookingError, BookingSettings, Relation, Result, ServiceLineItem, TimeWindow,
};
use tracing::{debug, instrument};

use super::mapper;
use super::normalizer::{normalize_services, referenced_service_ids};
use super::ports::{AppointmentRepository, ServiceCatalog, UserDirectory};
use super::validator::validate_appointment;

/// Appointment booking engine facade.
///
/// Coordinates the save pipeline (normalize, validate, atomic persist) and
/// exposes the read-side operations over the same ports. Capacity policy is
/// deliberately absent: the overlap counters only report numbers.
pub struct BookingService {
    repository: Arc<dyn AppointmentRepository>,
    catalog: Arc<dyn ServiceCatalog>,
    directory: Arc<dyn UserDirectory>,
    settings: BookingSettings,
}

impl BookingService {
    /// Create a new booking service with default settings.
    pub fn new(
        repository: Arc<dyn AppointmentRepository>,
        catalog: Arc<dyn ServiceCatalog>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self { repository, catalog, directory, settings: BookingSettings::default() }
    }

    /// Override the validation settings.
    pub fn with_settings(mut self, settings: BookingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Save (insert or update) an appointment together with its line items.
    ///
    /// Returns the appointment id. On any persistence failure the entire
    /// transaction is rolled back and no id is returned.
    #[instrument(skip(self, payload), fields(appointment_id = payload.id))]
    pub async fn save(&self, payload: &Appointment) -> Result<i64> {
        let service_ids = referenced_service_ids(payload);

        let defaults = if service_ids.is_empty() {
            HashMap::new()
        } else {
            self.catalog.service_defaults(&service_ids).await?
        };

        let normalized = normalize_services(payload, &defaults);

        // Project the resolved primary service and totals onto the payload
        // before validation sees it.
        let mut appointment = payload.clone();

        // Non-positive ids mean "new"; the validator and the store must agree
        // on that reading, so the id is normalized once here.
        appointment.id = appointment.id.filter(|id| *id > 0);

        if let Some(main_service_id) = normalized.main_service_id {
            appointment.service_id = Some(main_service_id);
        }

        appointment.total_duration = normalized.total_duration;
        appointment.total_price = normalized.total_price;

        self.validate(&appointment).await?;

        let appointment_id = self.repository.persist(appointment, normalized.services).await?;

        debug!(appointment_id, "appointment saved");

        Ok(appointment_id)
    }

    /// Validate an appointment payload without persisting anything.
    pub async fn validate(&self, appointment: &Appointment) -> Result<()> {
        validate_appointment(
            appointment,
            &self.settings,
            self.repository.as_ref(),
            self.catalog.as_ref(),
            self.directory.as_ref(),
        )
        .await
    }

    /// Fetch a single appointment row.
    pub async fn find(&self, appointment_id: i64) -> Result<Appointment> {
        self.repository.find(appointment_id).await
    }

    /// List appointment rows matching the query.
    pub async fn get(&self, query: AppointmentQuery) -> Result<Vec<Appointment>> {
        self.repository.get(query).await
    }

    /// Remove an appointment; its line items are removed with it.
    #[instrument(skip(self))]
    pub async fn delete(&self, appointment_id: i64) -> Result<()> {
        self.repository.delete(appointment_id).await
    }

    /// Ordered line items for one appointment.
    pub async fn services_for_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Vec<ServiceLineItem>> {
        self.repository.services_for_appointment(appointment_id).await
    }

    /// Count same-service bookings for a provider overlapping the window.
    pub async fn attendants_for_period(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> Result<i64> {
        self.repository
            .attendants_for_period(window, service_id, provider_id, exclude_appointment_id)
            .await
    }

    /// Count different-service bookings for a provider overlapping the
    /// window (cross-service double-booking detection).
    pub async fn other_service_attendants(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> Result<i64> {
        self.repository
            .other_service_attendants(window, service_id, provider_id, exclude_appointment_id)
            .await
    }

    /// Derive the end date-time from the start plus the primary service's
    /// catalog duration.
    pub async fn calculate_end_datetime(&self, appointment: &Appointment) -> Result<String> {
        let service_id = appointment.service_id.ok_or_else(|| {
            BookingError::InvalidInput("the appointment has no primary service id".into())
        })?;

        let service = self.catalog.find_service(service_id).await?.ok_or_else(|| {
            BookingError::NotFound(format!("service was not found in the catalog: {service_id}"))
        })?;

        let start = appointment
            .start_datetime
            .as_deref()
            .and_then(parse_datetime)
            .ok_or_else(|| {
                BookingError::InvalidInput("the appointment start date time is invalid".into())
            })?;

        Ok(format_datetime(start + Duration::minutes(service.duration.unwrap_or(0))))
    }

    /// Attach related records (service, provider, customer) by name.
    ///
    /// Unknown relation names are rejected as invalid input before any
    /// lookup happens.
    pub async fn load(
        &self,
        appointment: &Appointment,
        resources: &[&str],
    ) -> Result<AppointmentDetails> {
        let relations = resources
            .iter()
            .map(|name| name.parse::<Relation>())
            .collect::<Result<Vec<_>>>()?;

        let mut details =
            AppointmentDetails { appointment: appointment.clone(), ..AppointmentDetails::default() };

        for relation in relations {
            match relation {
                Relation::Service => {
                    if let Some(service_id) = appointment.service_id {
                        details.service = self.catalog.find_service(service_id).await?;
                    }
                }
                Relation::Provider => {
                    if let Some(provider_id) = appointment.provider_id {
                        details.provider = self.directory.find_user(provider_id).await?;
                    }
                }
                Relation::Customer => {
                    if let Some(customer_id) = appointment.customer_id {
                        details.customer = self.directory.find_user(customer_id).await?;
                    }
                }
            }
        }

        Ok(details)
    }

    /// Encode a storage row as an external resource, attaching the ordered
    /// line-item list for persisted rows.
    pub async fn api_encode(&self, appointment: &Appointment) -> Result<Value> {
        let services = match appointment.id {
            Some(appointment_id) => {
                Some(self.repository.services_for_appointment(appointment_id).await?)
            }
            None => None,
        };

        Ok(mapper::api_encode(appointment, services.as_deref()))
    }

    /// Decode an external resource into a storage-shaped payload.
    pub fn api_decode(&self, resource: &Value, base: Option<&Appointment>) -> Appointment {
        mapper::api_decode(resource, base)
    }

    /// Null out Google calendar sync ids for all of a provider's rows.
    #[instrument(skip(self))]
    pub async fn clear_google_sync_ids(&self, provider_id: i64) -> Result<()> {
        self.repository.clear_google_sync_ids(provider_id).await
    }

    /// Null out CalDAV calendar sync ids for all of a provider's rows.
    #[instrument(skip(self))]
    pub async fn clear_caldav_sync_ids(&self, provider_id: i64) -> Result<()> {
        self.repository.clear_caldav_sync_ids(provider_id).await
    }
}
