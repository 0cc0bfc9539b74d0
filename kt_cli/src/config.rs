//! Desk configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use karate_tournament::{MatchRules, TournamentSettings, judging::JudgingSettings};
use std::path::PathBuf;

/// Snapshot file used when neither `--data` nor `KT_DATA_FILE` is given
pub const DEFAULT_DATA_FILE: &str = "tournament.json";

/// Complete desk configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Snapshot file the desk reads and writes
    pub data_file: PathBuf,
    /// Settings for a tournament created from scratch
    pub settings: TournamentSettings,
    /// Fixed draw seed; random when unset
    pub bracket_seed: Option<u64>,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `data_override` - Optional snapshot path override (from CLI args)
    pub fn from_env(data_override: Option<PathBuf>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), data_override)
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, data_override: Option<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| parse_var_or(&lookup, key, default);

        let data_file = data_override
            .or_else(|| lookup("KT_DATA_FILE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let defaults = TournamentSettings::default();
        let match_rules = MatchRules {
            duration_secs: parse_var_or(
                &lookup,
                "KT_MATCH_DURATION_SECS",
                defaults.match_rules.duration_secs,
            ),
            overtime_secs: parse_var_or(
                &lookup,
                "KT_OVERTIME_SECS",
                defaults.match_rules.overtime_secs,
            ),
            advantage_rule: flag("KT_ADVANTAGE_RULE", defaults.match_rules.advantage_rule),
        };

        let settings = TournamentSettings {
            name: lookup("KT_TOURNAMENT_NAME").unwrap_or(defaults.name),
            partition_by_belt: flag("KT_PARTITION_BY_BELT", defaults.partition_by_belt),
            partition_by_age: flag("KT_PARTITION_BY_AGE", defaults.partition_by_age),
            match_rules,
            judging: JudgingSettings {
                min_judges: parse_var_or(&lookup, "KT_MIN_JUDGES", defaults.judging.min_judges),
            },
        };

        let bracket_seed = lookup("KT_BRACKET_SEED").and_then(|v| v.parse().ok());

        CliConfig {
            data_file,
            settings,
            bracket_seed,
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "KT_DATA_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.settings.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "KT_TOURNAMENT_NAME".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if let Err(reason) = self.settings.match_rules.validate() {
            let var = if self.settings.match_rules.duration_secs == 0 {
                "KT_MATCH_DURATION_SECS"
            } else {
                "KT_OVERTIME_SECS"
            };
            return Err(ConfigError::Invalid {
                var: var.to_string(),
                reason,
            });
        }

        self.settings
            .judging
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "KT_MIN_JUDGES".to_string(),
                reason,
            })?;

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback
fn parse_var_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
