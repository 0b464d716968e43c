//! # Slotbook Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The payload normalizer, validator, and persistence coordinator
//! - Port/adapter interfaces (traits) for the catalog, directory, and store
//! - The wire-boundary API mapper
//!
//! ## Architecture Principles
//! - Only depends on `slotbook-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod booking;

// Re-export specific items to avoid ambiguity
pub use booking::mapper::{api_decode, api_encode};
pub use booking::normalizer::{normalize_services, referenced_service_ids};
pub use booking::ports::{AppointmentRepository, ServiceCatalog, UserDirectory};
pub use booking::BookingService;
