//! SQLite-backed implementation of the AppointmentRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, OptionalExtension, Row, Transaction};
use slotbook_core::AppointmentRepository;
use slotbook_domain::constants::APPOINTMENT_HASH_LENGTH;
use slotbook_domain::{
    format_datetime, Appointment, AppointmentQuery, BookingError, Result, ServiceLineItem,
    TimeWindow,
};
use tracing::{debug, instrument};

use super::manager::DbManager;
use crate::errors::InfraError;

const APPOINTMENT_COLUMNS: &str = "id, book_datetime, start_datetime, end_datetime, location, \
     color, status, notes, hash, is_unavailability, id_users_provider, id_users_customer, \
     id_services, total_duration, total_price, id_google_calendar, id_caldav_calendar, \
     create_datetime, update_datetime";

/// SQLite implementation of the transactional appointment store.
pub struct SqliteAppointmentRepository {
    db: Arc<DbManager>,
}

impl SqliteAppointmentRepository {
    /// Create a new appointment repository.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    async fn exists(&self, appointment_id: i64) -> Result<bool> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM appointments WHERE id = ?1",
                    params![appointment_id],
                    |row| row.get(0),
                )
                .map_err(InfraError::from)?;
            Ok(count > 0)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, appointment, services), fields(appointment_id = appointment.id))]
    async fn persist(
        &self,
        appointment: Appointment,
        services: Vec<ServiceLineItem>,
    ) -> Result<i64> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(InfraError::from)?;

            let appointment_id = match appointment.id {
                None => insert_appointment(&tx, &appointment)?,
                Some(id) => update_appointment(&tx, id, &appointment)?,
            };

            // Full replacement: line items are never merged.
            if !services.is_empty() {
                replace_line_items(&tx, appointment_id, &services)?;
            }

            tx.commit().map_err(InfraError::from)?;

            debug!(appointment_id, line_items = services.len(), "appointment persisted");

            Ok(appointment_id)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    async fn find(&self, appointment_id: i64) -> Result<Appointment> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let row = conn
                .query_row(
                    &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
                    params![appointment_id],
                    row_to_appointment,
                )
                .optional()
                .map_err(InfraError::from)?;

            row.ok_or_else(|| {
                BookingError::NotFound(format!(
                    "the provided appointment id was not found: {appointment_id}"
                ))
            })
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, query))]
    async fn get(&self, query: AppointmentQuery) -> Result<Vec<Appointment>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;

            let mut sql = format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE is_unavailability = 0"
            );
            let mut values: Vec<SqlValue> = Vec::new();

            if let Some(provider_id) = query.provider_id {
                sql.push_str(" AND id_users_provider = ?");
                values.push(SqlValue::Integer(provider_id));
            }

            if let Some(customer_id) = query.customer_id {
                sql.push_str(" AND id_users_customer = ?");
                values.push(SqlValue::Integer(customer_id));
            }

            if let Some(service_id) = query.service_id {
                sql.push_str(" AND id_services = ?");
                values.push(SqlValue::Integer(service_id));
            }

            if let Some(start_from) = query.start_from {
                sql.push_str(" AND start_datetime >= ?");
                values.push(SqlValue::Text(start_from));
            }

            if let Some(end_until) = query.end_until {
                sql.push_str(" AND end_datetime <= ?");
                values.push(SqlValue::Text(end_until));
            }

            if let Some(order) = query.order_by {
                sql.push_str(" ORDER BY ");
                sql.push_str(order.column.column());
                sql.push_str(if order.descending { " DESC" } else { " ASC" });
            }

            match (query.limit, query.offset) {
                (Some(limit), offset) => {
                    sql.push_str(" LIMIT ?");
                    values.push(SqlValue::Integer(limit));
                    if let Some(offset) = offset {
                        sql.push_str(" OFFSET ?");
                        values.push(SqlValue::Integer(offset));
                    }
                }
                (None, Some(offset)) => {
                    // SQLite requires a LIMIT clause before OFFSET.
                    sql.push_str(" LIMIT -1 OFFSET ?");
                    values.push(SqlValue::Integer(offset));
                }
                (None, None) => {}
            }

            let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
            let rows = stmt
                .query_map(params_from_iter(values), row_to_appointment)
                .map_err(InfraError::from)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(InfraError::from)?;

            debug!(count = rows.len(), "retrieved appointments");

            Ok(rows)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn delete(&self, appointment_id: i64) -> Result<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM appointments WHERE id = ?1", params![appointment_id])
                .map_err(InfraError::from)?;
            Ok(())
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    async fn services_for_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Vec<ServiceLineItem>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT service_id, duration, price, position
                     FROM appointment_services
                     WHERE appointment_id = ?1
                     ORDER BY position ASC",
                )
                .map_err(InfraError::from)?;

            let items = stmt
                .query_map(params![appointment_id], |row| {
                    Ok(ServiceLineItem {
                        service_id: row.get(0)?,
                        duration: row.get(1)?,
                        price: row.get(2)?,
                        position: row.get(3)?,
                    })
                })
                .map_err(InfraError::from)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(InfraError::from)?;

            Ok(items)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    async fn attendants_for_period(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> Result<i64> {
        self.count_attendants(window, service_id, provider_id, exclude_appointment_id, true).await
    }

    async fn other_service_attendants(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> Result<i64> {
        self.count_attendants(window, service_id, provider_id, exclude_appointment_id, false).await
    }

    #[instrument(skip(self))]
    async fn clear_google_sync_ids(&self, provider_id: i64) -> Result<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let cleared = conn
                .execute(
                    "UPDATE appointments SET id_google_calendar = NULL
                     WHERE id_users_provider = ?1",
                    params![provider_id],
                )
                .map_err(InfraError::from)?;
            debug!(provider_id, cleared, "cleared google sync ids");
            Ok(())
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn clear_caldav_sync_ids(&self, provider_id: i64) -> Result<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let cleared = conn
                .execute(
                    "UPDATE appointments SET id_caldav_calendar = NULL
                     WHERE id_users_provider = ?1",
                    params![provider_id],
                )
                .map_err(InfraError::from)?;
            debug!(provider_id, cleared, "cleared caldav sync ids");
            Ok(())
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }
}

impl SqliteAppointmentRepository {
    /// Shared overlap counting query.
    ///
    /// The boundary rule is deliberately asymmetric (`<=`/`>` at the window
    /// start, `<`/`>=` at the end) so exact back-to-back bookings never
    /// count as overlapping.
    async fn count_attendants(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
        same_service: bool,
    ) -> Result<i64> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;

            let mut sql = String::from(
                "SELECT COUNT(*) FROM appointments
                 WHERE ((start_datetime <= ?1 AND end_datetime > ?1)
                     OR (start_datetime < ?2 AND end_datetime >= ?2))",
            );
            sql.push_str(if same_service {
                " AND id_services = ?3"
            } else {
                " AND id_services != ?3"
            });
            sql.push_str(" AND id_users_provider = ?4");

            let mut values: Vec<SqlValue> = vec![
                SqlValue::Text(window.start_text()),
                SqlValue::Text(window.end_text()),
                SqlValue::Integer(service_id),
                SqlValue::Integer(provider_id),
            ];

            if let Some(excluded) = exclude_appointment_id {
                sql.push_str(" AND id != ?5");
                values.push(SqlValue::Integer(excluded));
            }

            let count: i64 = conn
                .query_row(&sql, params_from_iter(values), |row| row.get(0))
                .map_err(InfraError::from)?;

            Ok(count)
        })
        .await
        .map_err(|e| BookingError::Internal(e.to_string()))?
    }
}

fn insert_appointment(tx: &Transaction<'_>, appointment: &Appointment) -> Result<i64> {
    let now = format_datetime(Utc::now().naive_utc());
    let hash = generate_hash();

    tx.execute(
        "INSERT INTO appointments (
            book_datetime, start_datetime, end_datetime, location, color, status, notes,
            hash, is_unavailability, id_users_provider, id_users_customer, id_services,
            total_duration, total_price, id_google_calendar, id_caldav_calendar,
            create_datetime, update_datetime
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        params![
            now,
            appointment.start_datetime,
            appointment.end_datetime,
            appointment.location,
            appointment.color,
            appointment.status,
            appointment.notes,
            hash,
            appointment.is_unavailability,
            appointment.provider_id,
            appointment.customer_id,
            appointment.service_id,
            appointment.total_duration,
            appointment.total_price,
            appointment.google_calendar_id,
            appointment.caldav_calendar_id,
            now,
            now,
        ],
    )
    .map_err(InfraError::from)?;

    Ok(tx.last_insert_rowid())
}

fn update_appointment(
    tx: &Transaction<'_>,
    appointment_id: i64,
    appointment: &Appointment,
) -> Result<i64> {
    let now = format_datetime(Utc::now().naive_utc());

    // The confirmation hash and book/create stamps are immutable after
    // creation; only the update stamp is refreshed.
    tx.execute(
        "UPDATE appointments SET
            start_datetime = ?1, end_datetime = ?2, location = ?3, color = ?4, status = ?5,
            notes = ?6, is_unavailability = ?7, id_users_provider = ?8, id_users_customer = ?9,
            id_services = ?10, total_duration = ?11, total_price = ?12,
            id_google_calendar = ?13, id_caldav_calendar = ?14, update_datetime = ?15
         WHERE id = ?16",
        params![
            appointment.start_datetime,
            appointment.end_datetime,
            appointment.location,
            appointment.color,
            appointment.status,
            appointment.notes,
            appointment.is_unavailability,
            appointment.provider_id,
            appointment.customer_id,
            appointment.service_id,
            appointment.total_duration,
            appointment.total_price,
            appointment.google_calendar_id,
            appointment.caldav_calendar_id,
            now,
            appointment_id,
        ],
    )
    .map_err(InfraError::from)?;

    Ok(appointment_id)
}

fn replace_line_items(
    tx: &Transaction<'_>,
    appointment_id: i64,
    services: &[ServiceLineItem],
) -> Result<()> {
    tx.execute(
        "DELETE FROM appointment_services WHERE appointment_id = ?1",
        params![appointment_id],
    )
    .map_err(InfraError::from)?;

    for item in services {
        tx.execute(
            "INSERT INTO appointment_services (appointment_id, service_id, duration, price, position)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![appointment_id, item.service_id, item.duration, item.price, item.position],
        )
        .map_err(InfraError::from)?;
    }

    Ok(())
}

fn row_to_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        book_datetime: row.get(1)?,
        start_datetime: row.get(2)?,
        end_datetime: row.get(3)?,
        location: row.get(4)?,
        color: row.get(5)?,
        status: row.get(6)?,
        notes: row.get(7)?,
        hash: row.get(8)?,
        is_unavailability: row.get(9)?,
        provider_id: row.get(10)?,
        customer_id: row.get(11)?,
        service_id: row.get(12)?,
        total_duration: row.get(13)?,
        total_price: row.get(14)?,
        google_calendar_id: row.get(15)?,
        caldav_calendar_id: row.get(16)?,
        create_datetime: row.get(17)?,
        update_datetime: row.get(18)?,
        services: None,
    })
}

fn generate_hash() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(APPOINTMENT_HASH_LENGTH)
        .map(char::from)
        .collect()
}
