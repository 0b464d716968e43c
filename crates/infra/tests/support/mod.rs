//! Shared helpers for the SQLite integration tests.

use std::sync::Arc;

use slotbook_domain::Appointment;
use slotbook_infra::DbManager;
use tempfile::TempDir;

/// A migrated SQLite database on a throwaway temp file.
///
/// The temp directory must outlive the pool, so it is kept alongside it.
pub struct TestDatabase {
    pub db: Arc<DbManager>,
    _dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir created");
        let db = DbManager::new(dir.path().join("slotbook.db"), 4).expect("manager created");
        db.run_migrations().expect("migrations run");
        Self { db: Arc::new(db), _dir: dir }
    }

    pub fn seed_user(&self, first_name: &str, role_slug: &str) -> i64 {
        let conn = self.db.get_connection().expect("connection acquired");
        conn.execute(
            "INSERT INTO users (first_name, last_name, email, role_slug)
             VALUES (?1, 'Doe', ?2, ?3)",
            rusqlite::params![
                first_name,
                format!("{}@example.org", first_name.to_lowercase()),
                role_slug
            ],
        )
        .expect("user inserted");
        conn.last_insert_rowid()
    }

    pub fn seed_service(&self, name: &str, duration: i64, price: f64) -> i64 {
        let conn = self.db.get_connection().expect("connection acquired");
        conn.execute(
            "INSERT INTO services (name, duration, price, category) VALUES (?1, ?2, ?3, 'general')",
            rusqlite::params![name, duration, price],
        )
        .expect("service inserted");
        conn.last_insert_rowid()
    }

    pub fn appointment_count(&self) -> i64 {
        let conn = self.db.get_connection().expect("connection acquired");
        conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))
            .expect("count queried")
    }

    pub fn line_item_count(&self, appointment_id: i64) -> i64 {
        let conn = self.db.get_connection().expect("connection acquired");
        conn.query_row(
            "SELECT COUNT(*) FROM appointment_services WHERE appointment_id = ?1",
            rusqlite::params![appointment_id],
            |row| row.get(0),
        )
        .expect("count queried")
    }
}

/// A minimal valid save payload for the given references.
pub fn payload(provider_id: i64, customer_id: i64, service_id: i64) -> Appointment {
    Appointment {
        start_datetime: Some("2026-03-02 10:00:00".into()),
        end_datetime: Some("2026-03-02 11:00:00".into()),
        notes: Some("integration fixture".into()),
        status: Some("Booked".into()),
        provider_id: Some(provider_id),
        customer_id: Some(customer_id),
        service_id: Some(service_id),
        ..Appointment::default()
    }
}
