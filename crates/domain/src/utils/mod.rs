//! Domain utility helpers

pub mod datetime;
