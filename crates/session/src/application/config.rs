//! Application Configuration
//!
//! Configuration for the session lifecycle layer.

use std::time::Duration;

/// Session lifecycle configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Renew once remaining lifetime falls under this (30 minutes)
    ///
    /// Chosen so renewal happens comfortably before expiry even under
    /// clock drift.
    pub refresh_threshold: Duration,
    /// Floor on the scheduled renewal delay (5 minutes)
    ///
    /// Keeps a nearly expired session from being hammered with
    /// near-zero-delay renewal loops.
    pub min_refresh_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_threshold: Duration::from_secs(30 * 60),
            min_refresh_delay: Duration::from_secs(5 * 60),
        }
    }
}

impl SessionConfig {
    /// Get the refresh threshold in milliseconds
    pub fn refresh_threshold_ms(&self) -> i64 {
        self.refresh_threshold.as_millis() as i64
    }

    /// Get the minimum refresh delay in milliseconds
    pub fn min_refresh_delay_ms(&self) -> i64 {
        self.min_refresh_delay.as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.refresh_threshold, Duration::from_secs(1800));
        assert_eq!(config.min_refresh_delay, Duration::from_secs(300));
        assert_eq!(config.refresh_threshold_ms(), 1_800_000);
        assert_eq!(config.min_refresh_delay_ms(), 300_000);
    }
}
