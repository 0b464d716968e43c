//! Appointment validator
//!
//! Ordered fail-fast checks over a fully-merged payload. Validation reads
//! through the ports but never mutates anything; every rejected payload maps
//! to a distinct invalid-input error.

use slotbook_domain::{
    parse_datetime, Appointment, BookingError, BookingSettings, Result, UserRole,
};

use super::ports::{AppointmentRepository, ServiceCatalog, UserDirectory};

/// Validate a merged appointment payload.
///
/// The payload is expected to already carry the normalizer's projected
/// primary service id and totals.
pub async fn validate_appointment(
    appointment: &Appointment,
    settings: &BookingSettings,
    repository: &dyn AppointmentRepository,
    catalog: &dyn ServiceCatalog,
    directory: &dyn UserDirectory,
) -> Result<()> {
    // 1. A provided id must reference an existing record.
    if let Some(id) = present_id(appointment.id) {
        if !repository.exists(id).await? {
            return Err(BookingError::InvalidInput(format!(
                "the provided appointment id does not exist: {id}"
            )));
        }
    }

    // 2. Required field presence.
    let has_services = appointment.services.as_ref().is_some_and(|list| !list.is_empty());

    if text_missing(&appointment.start_datetime)
        || text_missing(&appointment.end_datetime)
        || (present_id(appointment.service_id).is_none() && !has_services)
        || present_id(appointment.provider_id).is_none()
        || present_id(appointment.customer_id).is_none()
        || (text_missing(&appointment.notes) && settings.require_notes)
    {
        return Err(BookingError::InvalidInput(
            "not all required appointment fields are provided".into(),
        ));
    }

    // 3. Date-time values must parse.
    let start = appointment
        .start_datetime
        .as_deref()
        .and_then(parse_datetime)
        .ok_or_else(|| {
            BookingError::InvalidInput("the appointment start date time is invalid".into())
        })?;

    let end = appointment
        .end_datetime
        .as_deref()
        .and_then(parse_datetime)
        .ok_or_else(|| {
            BookingError::InvalidInput("the appointment end date time is invalid".into())
        })?;

    // 4. Minimum duration threshold.
    let minutes = (end - start).num_minutes();

    if minutes < settings.minimum_duration_minutes {
        return Err(BookingError::InvalidInput(format!(
            "the appointment duration cannot be less than {} minutes",
            settings.minimum_duration_minutes
        )));
    }

    // 5. The provider must resolve to a provider-role user.
    let provider_id = appointment.provider_id.unwrap_or_default();

    if !directory.user_has_role(provider_id, UserRole::Provider).await? {
        return Err(BookingError::InvalidInput(format!(
            "the appointment provider id was not found in the user directory: {provider_id}"
        )));
    }

    // 6. Unavailability blocks are exempt from customer and catalog checks.
    if !appointment.is_unavailability {
        let customer_id = appointment.customer_id.unwrap_or_default();

        if !directory.user_has_role(customer_id, UserRole::Customer).await? {
            return Err(BookingError::InvalidInput(format!(
                "the appointment customer id was not found in the user directory: {customer_id}"
            )));
        }

        if let Some(service_id) = present_id(appointment.service_id) {
            if !catalog.service_exists(service_id).await? {
                return Err(BookingError::InvalidInput(format!(
                    "the appointment service id is invalid: {service_id}"
                )));
            }
        }
    }

    Ok(())
}

/// Treat absent and non-positive ids alike, matching the permissive payload
/// handling of the read side.
fn present_id(value: Option<i64>) -> Option<i64> {
    value.filter(|id| *id > 0)
}

fn text_missing(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |text| text.trim().is_empty())
}
