//! Match data models.

use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use uuid::Uuid;

use crate::constants::{DEFAULT_MATCH_DURATION_SECS, DEFAULT_OVERTIME_SECS};
use crate::entities::EntrantId;

/// Match ID type
pub type MatchId = Uuid;

/// The two sides of a head-to-head match.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Corner {
    /// Red corner
    Aka,
    /// White corner
    Shiro,
}

impl Corner {
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::Aka => Self::Shiro,
            Self::Shiro => Self::Aka,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aka => write!(f, "aka"),
            Self::Shiro => write!(f, "shiro"),
        }
    }
}

/// Rules for timed matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Regulation time in seconds (default: 180)
    pub duration_secs: u32,

    /// Length of each overtime segment in seconds (default: 60)
    pub overtime_secs: u32,

    /// Whether the first scorer wins a tied match (senshu)
    pub advantage_rule: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_MATCH_DURATION_SECS,
            overtime_secs: DEFAULT_OVERTIME_SECS,
            advantage_rule: true,
        }
    }
}

impl MatchRules {
    /// Validate rules
    pub fn validate(&self) -> Result<(), String> {
        if self.duration_secs == 0 {
            return Err("Match duration must be greater than 0".to_string());
        }

        if self.overtime_secs == 0 {
            return Err("Overtime length must be greater than 0".to_string());
        }

        Ok(())
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    #[must_use]
    pub fn overtime(&self) -> Duration {
        Duration::from_secs(u64::from(self.overtime_secs))
    }
}

/// Clock, penalty and advantage state of a timed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedState {
    pub rules: MatchRules,
    pub remaining: Duration,
    pub running: bool,
    pub penalty_aka: u32,
    pub penalty_shiro: u32,
    /// Holder of the first-score advantage. An `Option` so that at most one
    /// corner can ever hold it.
    pub advantage: Option<Corner>,
    /// Set once the advantage has been awarded in the current segment, so a
    /// withdrawn advantage is not handed out again.
    pub advantage_awarded: bool,
    pub overtime: bool,
    pub overtime_count: u32,
}

impl TimedState {
    #[must_use]
    pub fn new(rules: MatchRules) -> Self {
        Self {
            remaining: rules.duration(),
            rules,
            running: false,
            penalty_aka: 0,
            penalty_shiro: 0,
            advantage: None,
            advantage_awarded: false,
            overtime: false,
            overtime_count: 0,
        }
    }

    #[must_use]
    pub fn penalty(&self, corner: Corner) -> u32 {
        match corner {
            Corner::Aka => self.penalty_aka,
            Corner::Shiro => self.penalty_shiro,
        }
    }

    pub(crate) fn penalty_mut(&mut self, corner: Corner) -> &mut u32 {
        match corner {
            Corner::Aka => &mut self.penalty_aka,
            Corner::Shiro => &mut self.penalty_shiro,
        }
    }

    /// Remaining time as `MM:SS`, the way the scoreboard shows it.
    #[must_use]
    pub fn clock_display(&self) -> String {
        let secs = self.remaining.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Match variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchKind {
    /// Points only, no clock
    Standard,
    /// Clocked bout with penalties, advantage and overtime
    Timed(TimedState),
}

/// How a finished match was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecidedBy {
    Points,
    Advantage,
    Bye,
    Disqualification,
    Decision,
}

/// Match lifecycle phase, derived from the match fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// At least one corner still waits for a contender
    Pending,
    /// Both corners filled, scoring open
    Ready,
    /// Ready, playing an overtime segment
    Overtime,
    /// Decided
    Finished,
}

/// A head-to-head match between the contenders in its two corners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub aka: Option<EntrantId>,
    pub shiro: Option<EntrantId>,
    pub aka_score: u32,
    pub shiro_score: u32,
    pub winner: Option<EntrantId>,
    pub finished: bool,
    pub disqualification: bool,
    pub decided_by: Option<DecidedBy>,
    pub kind: MatchKind,
}

impl Match {
    /// Create an empty untimed match
    #[must_use]
    pub fn standard(id: MatchId) -> Self {
        Self::with_kind(id, MatchKind::Standard)
    }

    /// Create an empty timed match
    #[must_use]
    pub fn timed(id: MatchId, rules: MatchRules) -> Self {
        Self::with_kind(id, MatchKind::Timed(TimedState::new(rules)))
    }

    fn with_kind(id: MatchId, kind: MatchKind) -> Self {
        Self {
            id,
            aka: None,
            shiro: None,
            aka_score: 0,
            shiro_score: 0,
            winner: None,
            finished: false,
            disqualification: false,
            decided_by: None,
            kind,
        }
    }

    /// Seat contenders in both corners
    #[must_use]
    pub fn with_contenders(mut self, aka: Option<EntrantId>, shiro: Option<EntrantId>) -> Self {
        self.aka = aka;
        self.shiro = shiro;
        self
    }

    #[must_use]
    pub fn contender(&self, corner: Corner) -> Option<EntrantId> {
        match corner {
            Corner::Aka => self.aka,
            Corner::Shiro => self.shiro,
        }
    }

    /// Corner occupied by `entrant`, if any
    #[must_use]
    pub fn corner_of(&self, entrant: EntrantId) -> Option<Corner> {
        if self.aka == Some(entrant) {
            Some(Corner::Aka)
        } else if self.shiro == Some(entrant) {
            Some(Corner::Shiro)
        } else {
            None
        }
    }

    #[must_use]
    pub fn score(&self, corner: Corner) -> u32 {
        match corner {
            Corner::Aka => self.aka_score,
            Corner::Shiro => self.shiro_score,
        }
    }

    pub(crate) fn score_mut(&mut self, corner: Corner) -> &mut u32 {
        match corner {
            Corner::Aka => &mut self.aka_score,
            Corner::Shiro => &mut self.shiro_score,
        }
    }

    #[must_use]
    pub fn timed_state(&self) -> Option<&TimedState> {
        match &self.kind {
            MatchKind::Timed(timed) => Some(timed),
            MatchKind::Standard => None,
        }
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        matches!(self.kind, MatchKind::Timed(_))
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        if self.finished {
            return MatchPhase::Finished;
        }
        if self.aka.is_none() || self.shiro.is_none() {
            return MatchPhase::Pending;
        }
        match &self.kind {
            MatchKind::Timed(timed) if timed.overtime => MatchPhase::Overtime,
            _ => MatchPhase::Ready,
        }
    }
}
