//! Timestamp normalization.
//!
//! Viewers draw a Begin and End sharing one timestamp as garbage, so every
//! emitted timestamp must be strictly greater than the previous one, across
//! all tracks.

use crate::utils::config::TIMESTAMP_EPSILON_US;

/// Global strictly-increasing timestamp source
#[derive(Debug, Clone, Default)]
pub struct TimestampNormalizer {
    last_emitted_us: f64,
}

impl TimestampNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the timestamp for the next emitted event
    ///
    /// # Arguments
    /// * `origin_us` - Origin-relative time in microseconds
    ///
    /// # Returns
    /// `origin_us`, or one nanosecond past the last emitted timestamp if it
    /// would not be strictly greater
    pub fn normalize(&mut self, origin_us: f64) -> f64 {
        let timestamp = if origin_us > self.last_emitted_us {
            origin_us
        } else {
            self.last_emitted_us + TIMESTAMP_EPSILON_US
        };

        self.last_emitted_us = timestamp;
        timestamp
    }
}
