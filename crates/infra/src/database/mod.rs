//! SQLite-backed implementations of the booking ports

mod appointment_repository;
mod manager;
mod service_catalog;
mod user_directory;

pub use appointment_repository::SqliteAppointmentRepository;
pub use manager::{DbConnection, DbManager};
pub use service_catalog::SqliteServiceCatalog;
pub use user_directory::SqliteUserDirectory;
