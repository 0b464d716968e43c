//! Domain model types
//!
//! These types represent booking payloads, stored rows, and the related
//! catalog/directory records referenced by appointments.

pub mod appointment;
pub mod query;
pub mod service;
pub mod time;
pub mod user;

pub use appointment::{Appointment, AppointmentDetails, Relation};
pub use query::{AppointmentQuery, SortColumn, SortOrder};
pub use service::{
    NormalizedServices, Service, ServiceDefaults, ServiceEntry, ServiceLineItem,
};
pub use time::TimeWindow;
pub use user::{User, UserRole};
