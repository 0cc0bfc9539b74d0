//! Judging panel configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MIN_JUDGES;

/// Judging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgingSettings {
    /// Marks required before a performance can be closed (default: 3)
    pub min_judges: usize,
}

impl Default for JudgingSettings {
    fn default() -> Self {
        Self {
            min_judges: DEFAULT_MIN_JUDGES,
        }
    }
}

impl JudgingSettings {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        // One lowest and one highest mark are discarded.
        if self.min_judges < 3 {
            return Err("At least 3 judges are required".to_string());
        }

        Ok(())
    }
}
