//! Tuning parameters for the matcher.

use chrono::Duration;

/// Configuration parameters for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Number of route nodes kept per (driver, companion) pair after the
    /// aerial-distance pre-filter.
    pub top_k: usize,

    /// Extra time (minutes) the companion-side leg may take beyond the
    /// driver's time to the meeting point.
    pub buffer_mins: i64,
}

impl MatchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(top_k: usize, buffer_mins: i64) -> Self {
        Self { top_k, buffer_mins }
    }

    /// Returns the buffer as a Duration, saturating at the bounds chrono
    /// can represent.
    pub fn buffer(&self) -> Duration {
        Duration::try_minutes(self.buffer_mins).unwrap_or(if self.buffer_mins < 0 {
            Duration::MIN
        } else {
            Duration::MAX
        })
    }

    /// Returns the buffer in the graph's travel-time unit (seconds).
    pub fn buffer_secs(&self) -> f64 {
        self.buffer().num_seconds() as f64
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            buffer_mins: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MatchConfig::default();

        assert_eq!(config.top_k, 5);
        assert_eq!(config.buffer_mins, 5);
    }

    #[test]
    fn buffer_conversions() {
        let config = MatchConfig::default();

        assert_eq!(config.buffer(), Duration::minutes(5));
        assert_eq!(config.buffer_secs(), 300.0);
    }

    #[test]
    fn huge_buffer_saturates() {
        let config = MatchConfig::new(5, i64::MAX);

        assert_eq!(config.buffer(), Duration::MAX);
        assert!(config.buffer_secs() > 1e15);
        assert_eq!(MatchConfig::new(5, i64::MIN).buffer(), Duration::MIN);
    }

    #[test]
    fn custom_config() {
        let config = MatchConfig::new(3, 0);

        assert_eq!(config.top_k, 3);
        assert_eq!(config.buffer_secs(), 0.0);
    }
}
