//! # Slotbook Infrastructure
//!
//! Infrastructure implementations of the core booking ports.
//!
//! This crate contains:
//! - SQLite implementations of the appointment store, service catalog,
//!   and user directory ports
//! - The pooled connection manager and schema migrations
//!
//! ## Architecture
//! - Implements traits defined in `slotbook-core`
//! - Depends on `slotbook-domain` and `slotbook-core`
//! - Contains all "impure" code (I/O, transactions)

pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::{
    DbManager, SqliteAppointmentRepository, SqliteServiceCatalog, SqliteUserDirectory,
};
pub use errors::InfraError;
