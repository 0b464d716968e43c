//! API mapper
//!
//! Bidirectional transform between the external resource shape and the
//! storage shape. Field renames follow a fixed table; decode applies only
//! keys actually present in the input, so callers can issue partial updates
//! against a base record. Both directions are total and side-effect-free.

use serde_json::{json, Map, Value};
use slotbook_domain::{Appointment, ServiceEntry, ServiceLineItem};

/// Encode a storage row as an external resource.
///
/// Identifier fields are coerced to integers null-preservingly. When the row
/// carries a persisted id the ordered line-item list is attached under
/// `services`.
pub fn api_encode(appointment: &Appointment, services: Option<&[ServiceLineItem]>) -> Value {
    let mut resource = Map::new();

    resource.insert("id".into(), json!(appointment.id));
    resource.insert("book".into(), json!(appointment.book_datetime));
    resource.insert("start".into(), json!(appointment.start_datetime));
    resource.insert("end".into(), json!(appointment.end_datetime));
    resource.insert("hash".into(), json!(appointment.hash));
    resource.insert("color".into(), json!(appointment.color));
    resource.insert("status".into(), json!(appointment.status));
    resource.insert("location".into(), json!(appointment.location));
    resource.insert("notes".into(), json!(appointment.notes));
    resource.insert("customerId".into(), json!(appointment.customer_id));
    resource.insert("providerId".into(), json!(appointment.provider_id));
    resource.insert("serviceId".into(), json!(appointment.service_id));
    resource.insert("googleCalendarId".into(), json!(appointment.google_calendar_id));
    resource.insert("caldavCalendarId".into(), json!(appointment.caldav_calendar_id));

    if appointment.id.is_some() {
        let items = services.unwrap_or_default();
        resource.insert(
            "services".into(),
            serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new())),
        );
    }

    Value::Object(resource)
}

/// Decode an external resource into a storage-shaped payload.
///
/// Starts from `base` when provided (partial-update merge) and overwrites a
/// field only when its key is present in the input; a present `null` clears
/// the field. `is_unavailability` is always forced to false and `services`
/// passes through for the normalizer to resolve. List entries that do not
/// parse as service entries are dropped here so decode stays total; the
/// normalizer would discard them regardless.
pub fn api_decode(resource: &Value, base: Option<&Appointment>) -> Appointment {
    let mut decoded = base.cloned().unwrap_or_default();

    if let Some(object) = resource.as_object() {
        if let Some(value) = object.get("id") {
            decoded.id = value.as_i64();
        }

        if let Some(value) = object.get("book") {
            decoded.book_datetime = text(value);
        }

        if let Some(value) = object.get("start") {
            decoded.start_datetime = text(value);
        }

        if let Some(value) = object.get("end") {
            decoded.end_datetime = text(value);
        }

        if let Some(value) = object.get("hash") {
            decoded.hash = text(value);
        }

        if let Some(value) = object.get("location") {
            decoded.location = text(value);
        }

        if let Some(value) = object.get("color") {
            decoded.color = text(value);
        }

        if let Some(value) = object.get("status") {
            decoded.status = text(value);
        }

        if let Some(value) = object.get("notes") {
            decoded.notes = text(value);
        }

        if let Some(value) = object.get("customerId") {
            decoded.customer_id = value.as_i64();
        }

        if let Some(value) = object.get("providerId") {
            decoded.provider_id = value.as_i64();
        }

        if let Some(value) = object.get("serviceId") {
            decoded.service_id = value.as_i64();
        }

        if let Some(value) = object.get("googleCalendarId") {
            decoded.google_calendar_id = text(value);
        }

        if let Some(value) = object.get("caldavCalendarId") {
            decoded.caldav_calendar_id = text(value);
        }

        if let Some(Value::Array(entries)) = object.get("services") {
            decoded.services = Some(
                entries
                    .iter()
                    .filter_map(|entry| {
                        serde_json::from_value::<ServiceEntry>(entry.clone()).ok()
                    })
                    .collect(),
            );
        }
    }

    decoded.is_unavailability = false;

    decoded
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(ToOwned::to_owned)
}
