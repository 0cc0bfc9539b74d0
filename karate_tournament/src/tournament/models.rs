//! Tournament settings and snapshot models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    bout::MatchRules,
    category::Category,
    entities::{Participant, Team},
    judging::JudgingSettings,
};

/// Version written into every snapshot
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Tournament-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSettings {
    /// Tournament name
    pub name: String,

    /// Split categories by belt rank (default: true)
    pub partition_by_belt: bool,

    /// Split categories by age (default: true)
    pub partition_by_age: bool,

    /// Rules for head-to-head categories created from now on
    pub match_rules: MatchRules,

    pub judging: JudgingSettings,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            name: "Karate Tournament".to_string(),
            partition_by_belt: true,
            partition_by_age: true,
            match_rules: MatchRules::default(),
            judging: JudgingSettings::default(),
        }
    }
}

impl TournamentSettings {
    /// Create settings with the default rules
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Tournament name cannot be empty".to_string());
        }

        self.match_rules.validate()?;
        self.judging.validate()?;

        Ok(())
    }
}

/// Everything needed to restore a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub settings: TournamentSettings,
    pub participants: Vec<Participant>,
    pub teams: Vec<Team>,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        let settings = TournamentSettings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.partition_by_belt);
        assert!(settings.partition_by_age);
    }

    #[test]
    fn test_blank_name_rejected() {
        let settings = TournamentSettings::new("   ");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_nested_rules_validated() {
        let mut settings = TournamentSettings::new("Spring Cup");
        settings.match_rules.overtime_secs = 0;
        assert!(settings.validate().is_err());

        let mut settings = TournamentSettings::new("Spring Cup");
        settings.judging.min_judges = 1;
        assert!(settings.validate().is_err());
    }
}
