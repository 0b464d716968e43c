//! SQLite-backed implementation of the ServiceCatalog port.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, OptionalExtension};
use slotbook_core::ServiceCatalog;
use slotbook_domain::{BookingError, Result, Service, ServiceDefaults};
use tracing::debug;

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite implementation of the read-only service catalog.
pub struct SqliteServiceCatalog {
    db: Arc<DbManager>,
}

impl SqliteServiceCatalog {
    /// Create a new service catalog.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceCatalog for SqliteServiceCatalog {
    async fn service_defaults(&self, service_ids: &[i64]) -> Result<HashMap<i64, ServiceDefaults>> {
        if service_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids = service_ids.to_vec();
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;

            let placeholders = vec!["?"; ids.len()].join(", ");
            let sql = format!(
                "SELECT id, duration, price FROM services WHERE id IN ({placeholders})"
            );

            let values: Vec<SqlValue> = ids.iter().map(|id| SqlValue::Integer(*id)).collect();

            let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
            let rows = stmt
                .query_map(params_from_iter(values), |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        ServiceDefaults { duration: row.get(1)?, price: row.get(2)? },
                    ))
                })
                .map_err(InfraError::from)?
                .collect::<rusqlite::Result<HashMap<_, _>>>()
                .map_err(InfraError::from)?;

            debug!(requested = ids.len(), resolved = rows.len(), "fetched service defaults");

            Ok(rows)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    async fn service_exists(&self, service_id: i64) -> Result<bool> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM services WHERE id = ?1",
                    params![service_id],
                    |row| row.get(0),
                )
                .map_err(InfraError::from)?;
            Ok(count > 0)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    async fn find_service(&self, service_id: i64) -> Result<Option<Service>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let service = conn
                .query_row(
                    "SELECT id, name, duration, price, category FROM services WHERE id = ?1",
                    params![service_id],
                    |row| {
                        Ok(Service {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            duration: row.get(2)?,
                            price: row.get(3)?,
                            category: row.get(4)?,
                        })
                    },
                )
                .optional()
                .map_err(InfraError::from)?;
            Ok(service)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }
}
