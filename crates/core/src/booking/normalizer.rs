//! Payload normalizer
//!
//! Converts heterogeneous service input (legacy single service id or a
//! `services` list of bare ids and override objects) into an ordered list of
//! resolved line items plus aggregate totals. Pure with respect to the
//! provided catalog snapshot; it never fails and silently drops invalid ids.

use std::collections::HashMap;

use slotbook_domain::{
    Appointment, NormalizedServices, ServiceDefaults, ServiceEntry, ServiceLineItem,
};

/// Raw list entry before catalog defaults are applied.
///
/// The outer option on `duration`/`price` tracks whether the request carried
/// the key at all: `None` falls back to the catalog default, `Some(None)` is
/// an explicit null override.
struct RawEntry {
    service_id: i64,
    duration: Option<Option<i64>>,
    price: Option<Option<f64>>,
    position: Option<i64>,
}

/// Deduplicated service ids referenced by the payload, in request order.
///
/// Used to fetch catalog defaults for all entries in a single lookup before
/// calling [`normalize_services`].
pub fn referenced_service_ids(payload: &Appointment) -> Vec<i64> {
    let mut ids = Vec::new();

    for entry in raw_entries(payload) {
        if !ids.contains(&entry.service_id) {
            ids.push(entry.service_id);
        }
    }

    ids
}

/// Normalize the payload's service input against a catalog snapshot.
///
/// An empty raw list yields a pass-through result carrying the payload's own
/// totals and primary service id; unavailability blocks rely on this.
pub fn normalize_services(
    payload: &Appointment,
    defaults: &HashMap<i64, ServiceDefaults>,
) -> NormalizedServices {
    let raw = raw_entries(payload);

    if raw.is_empty() {
        return pass_through(payload);
    }

    let mut services = Vec::with_capacity(raw.len());
    let mut position_counter = 1;

    for entry in raw {
        let catalog = defaults.get(&entry.service_id).copied().unwrap_or_default();

        // Explicit override wins, including explicit null; absent keys take
        // the catalog default.
        let duration = match entry.duration {
            Some(value) => value,
            None => catalog.duration,
        };

        let price = match entry.price {
            Some(value) => value,
            None => catalog.price,
        };

        services.push(ServiceLineItem {
            service_id: entry.service_id,
            duration,
            price,
            position: entry.position.unwrap_or(position_counter),
        });

        position_counter += 1;
    }

    let mut total_duration = None;
    let mut total_price = None;

    for item in &services {
        if let Some(duration) = item.duration {
            total_duration = Some(total_duration.unwrap_or(0) + duration);
        }

        if let Some(price) = item.price {
            total_price = Some(total_price.unwrap_or(0.0) + price);
        }
    }

    let main_service_id = services.first().map(|item| item.service_id);

    NormalizedServices { services, total_duration, total_price, main_service_id }
}

fn pass_through(payload: &Appointment) -> NormalizedServices {
    NormalizedServices {
        services: Vec::new(),
        total_duration: payload.total_duration,
        total_price: payload.total_price,
        main_service_id: payload.service_id,
    }
}

fn raw_entries(payload: &Appointment) -> Vec<RawEntry> {
    if let Some(entries) = &payload.services {
        return entries
            .iter()
            .filter_map(|entry| match *entry {
                ServiceEntry::ById(service_id) if service_id > 0 => Some(RawEntry {
                    service_id,
                    duration: None,
                    price: None,
                    position: None,
                }),
                ServiceEntry::WithOverrides { service_id, duration, price, position }
                    if service_id > 0 =>
                {
                    Some(RawEntry { service_id, duration, price, position })
                }
                _ => None,
            })
            .collect();
    }

    // Legacy single-service payload: synthesize one entry from the totals.
    match payload.service_id {
        Some(service_id) if service_id > 0 => vec![RawEntry {
            service_id,
            duration: Some(payload.total_duration),
            price: Some(payload.total_price),
            position: Some(1),
        }],
        _ => Vec::new(),
    }
}
