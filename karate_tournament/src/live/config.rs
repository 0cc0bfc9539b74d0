//! Live match configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::DEFAULT_TICK_INTERVAL_MILLIS;

/// Live match configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMatchConfig {
    /// Clock tick period in milliseconds (default: 100)
    pub tick_interval_ms: u64,

    /// Commands buffered per match before senders wait (default: 100)
    pub inbox_capacity: usize,
}

impl Default for LiveMatchConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MILLIS,
            inbox_capacity: 100,
        }
    }
}

impl LiveMatchConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("Tick interval must be greater than 0".to_string());
        }

        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be greater than 0".to_string());
        }

        Ok(())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
