//! # Slotbook Domain
//!
//! Business domain types and models for the Slotbook booking engine.
//!
//! This crate contains:
//! - Domain data types (Appointment, ServiceLineItem, etc.)
//! - Domain error types and Result definitions
//! - Booking configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Slotbook crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export date-time helpers used across crate boundaries
pub use utils::datetime::{format_datetime, parse_datetime};
