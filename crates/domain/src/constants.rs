//! Domain constants
//!
//! Centralized location for all domain-level constants used throughout the
//! booking engine.

/// Minimum appointment duration in minutes (default for [`crate::BookingSettings`]).
pub const EVENT_MINIMUM_DURATION: i64 = 5;

/// Length of the opaque confirmation hash generated at creation time.
pub const APPOINTMENT_HASH_LENGTH: usize = 12;

// Role slugs used by the user directory
pub const ROLE_PROVIDER: &str = "provider";
pub const ROLE_CUSTOMER: &str = "customer";

/// Canonical date-time format for stored values (`2024-01-01 10:30:00`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Alternate accepted input format with a `T` separator (`2024-01-01T10:30:00`).
pub const DATETIME_FORMAT_T: &str = "%Y-%m-%dT%H:%M:%S";
