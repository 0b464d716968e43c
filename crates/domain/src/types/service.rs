//! Service catalog and line-item types

use serde::{Deserialize, Serialize};

/// Catalog service record (owned by an external catalog, read-only here).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: Option<String>,
    /// Default duration in minutes.
    pub duration: Option<i64>,
    /// Default price.
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// Default duration/price pair fetched from the catalog for one service id.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServiceDefaults {
    pub duration: Option<i64>,
    pub price: Option<f64>,
}

/// One raw entry of a `services` request list.
///
/// Callers may send either a bare service id or an object carrying optional
/// overrides. For `duration` and `price` the outer option tracks key
/// presence: an absent key falls back to the catalog default while an
/// explicit `null` keeps the value null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceEntry {
    ById(i64),
    WithOverrides {
        #[serde(alias = "serviceId")]
        service_id: i64,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "serde_with::rust::double_option"
        )]
        duration: Option<Option<i64>>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "serde_with::rust::double_option"
        )]
        price: Option<Option<f64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<i64>,
    },
}

impl ServiceEntry {
    /// The referenced service id, regardless of entry shape.
    pub fn service_id(&self) -> i64 {
        match *self {
            Self::ById(id) => id,
            Self::WithOverrides { service_id, .. } => service_id,
        }
    }
}

/// Resolved line item owned by exactly one appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLineItem {
    pub service_id: i64,
    /// Duration override in minutes (null keeps the catalog default out).
    pub duration: Option<i64>,
    /// Price override (null keeps the catalog default out).
    pub price: Option<f64>,
    /// 1-based ordering within the appointment.
    pub position: i64,
}

/// Output of the payload normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedServices {
    /// Resolved line items in request order; empty for pass-through payloads.
    pub services: Vec<ServiceLineItem>,
    /// Running duration sum; null until the first contributing item.
    pub total_duration: Option<i64>,
    /// Running price sum; null until the first contributing item.
    pub total_price: Option<f64>,
    /// First normalized entry's service id (or the legacy id on pass-through).
    pub main_service_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_entry_accepts_bare_ids() {
        let entry: ServiceEntry = serde_json::from_str("7").unwrap();
        assert_eq!(entry, ServiceEntry::ById(7));
    }

    #[test]
    fn service_entry_accepts_camel_case_id() {
        let entry: ServiceEntry = serde_json::from_str(r#"{"serviceId": 3}"#).unwrap();
        assert_eq!(entry.service_id(), 3);
    }

    #[test]
    fn service_entry_distinguishes_null_from_absent_overrides() {
        let entry: ServiceEntry =
            serde_json::from_str(r#"{"service_id": 3, "duration": null, "price": 25.0}"#).unwrap();

        match entry {
            ServiceEntry::WithOverrides { duration, price, position, .. } => {
                assert_eq!(duration, Some(None));
                assert_eq!(price, Some(Some(25.0)));
                assert_eq!(position, None);
            }
            other => panic!("expected overrides entry, got {other:?}"),
        }
    }
}
