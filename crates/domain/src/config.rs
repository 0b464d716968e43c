//! Booking engine configuration

use serde::{Deserialize, Serialize};

use crate::constants::EVENT_MINIMUM_DURATION;

/// Settings that influence validation behaviour.
///
/// These are passed explicitly into the booking service rather than looked up
/// through any global configuration mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSettings {
    /// Reject appointments without notes when enabled.
    pub require_notes: bool,
    /// Minimum accepted appointment duration in minutes.
    pub minimum_duration_minutes: i64,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self { require_notes: false, minimum_duration_minutes: EVENT_MINIMUM_DURATION }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_constants() {
        let settings = BookingSettings::default();
        assert!(!settings.require_notes);
        assert_eq!(settings.minimum_duration_minutes, EVENT_MINIMUM_DURATION);
    }
}
