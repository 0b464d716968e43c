//! Appointment booking engine
//!
//! Orchestration of the save pipeline (normalize, validate, persist) plus
//! the read-side operations exposed to callers.

pub mod mapper;
pub mod normalizer;
pub mod ports;
pub mod service;
pub mod validator;

pub use service::BookingService;
