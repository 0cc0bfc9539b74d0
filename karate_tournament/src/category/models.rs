//! Category data models.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};
use uuid::Uuid;

use super::errors::{CategoryError, CategoryResult};
use crate::{
    bout::{Match, MatchRules},
    constants::{
        JUNIOR_MAX_AGE, JUNIOR_MIN_AGE, OPEN_CATEGORY_NAME, SENIOR_CATEGORY_NAME, SENIOR_MAX_AGE,
        SENIOR_MIN_AGE,
    },
    entities::{Belt, Discipline, EntrantId, Participant, ParticipantId, Sex, Team, TeamId},
    judging::ParticipantResult,
};

/// Category ID type
pub type CategoryId = Uuid;

/// Inclusive age range. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: Option<u8>,
    pub max: Option<u8>,
}

impl AgeRange {
    pub fn new(min: Option<u8>, max: Option<u8>) -> CategoryResult<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(CategoryError::InvalidAgeRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// A single-age bucket
    #[must_use]
    pub fn exact(age: u8) -> Self {
        Self {
            min: Some(age),
            max: Some(age),
        }
    }

    #[must_use]
    pub fn seniors() -> Self {
        Self {
            min: Some(SENIOR_MIN_AGE),
            max: Some(SENIOR_MAX_AGE),
        }
    }

    #[must_use]
    pub fn juniors() -> Self {
        Self {
            min: Some(JUNIOR_MIN_AGE),
            max: Some(JUNIOR_MAX_AGE),
        }
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn contains(&self, age: u8) -> bool {
        self.min.is_none_or(|min| age >= min) && self.max.is_none_or(|max| age <= max)
    }

    /// Smallest range covering both. An unbounded side stays unbounded.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        };
        let max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
        Self { min, max }
    }

    #[must_use]
    pub fn is_senior(&self) -> bool {
        self.min.is_some_and(|min| min >= SENIOR_MIN_AGE)
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "{min}"),
            (Some(min), Some(max)) => write!(f, "{min}-{max}"),
            (Some(min), None) => write!(f, "{min}+"),
            (None, Some(max)) => write!(f, "0-{max}"),
            (None, None) => Ok(()),
        }
    }
}

/// Category kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryKind {
    /// Performances scored by a judging panel
    Judged,
    /// Timed bracket bouts
    HeadToHead { rules: MatchRules },
    /// Bracket between teams
    Team { teams: Vec<TeamId> },
}

impl CategoryKind {
    #[must_use]
    pub fn for_discipline(discipline: Discipline, rules: &MatchRules) -> Self {
        if discipline.is_head_to_head() {
            Self::HeadToHead {
                rules: rules.clone(),
            }
        } else if discipline.is_team() {
            Self::Team { teams: Vec::new() }
        } else {
            Self::Judged
        }
    }
}

/// A competition group: everyone in it competes against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub age_range: AgeRange,
    pub belts: BTreeSet<Belt>,
    pub sex: Sex,
    pub discipline: Discipline,
    pub kind: CategoryKind,
    pub members: Vec<ParticipantId>,
    /// Bracket nodes, root at index 0
    pub matches: Vec<Match>,
    pub finished: bool,
    /// Judged results in performance order
    pub results: Vec<ParticipantResult>,
}

impl Category {
    /// Create an empty category with a generated name
    #[must_use]
    pub fn new(
        discipline: Discipline,
        sex: Sex,
        age_range: AgeRange,
        belts: BTreeSet<Belt>,
        rules: &MatchRules,
    ) -> Self {
        let mut category = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            age_range,
            belts,
            sex,
            discipline,
            kind: CategoryKind::for_discipline(discipline, rules),
            members: Vec::new(),
            matches: Vec::new(),
            finished: false,
            results: Vec::new(),
        };
        category.regenerate_name();
        category
    }

    /// Whether `participant` passes every filter for `discipline`
    #[must_use]
    pub fn admits(&self, participant: &Participant, discipline: Discipline) -> bool {
        self.discipline == discipline
            && self.sex.admits(participant.sex)
            && self.age_range.contains(participant.age)
            && self.belts.contains(&participant.belt)
    }

    #[must_use]
    pub fn admits_team(&self, team: &Team) -> bool {
        matches!(self.kind, CategoryKind::Team { .. })
            && self.sex.admits(team.sex)
            && self.age_range.contains(team.age())
    }

    /// Returns false when the participant was already a member
    pub fn add_member(&mut self, participant: ParticipantId) -> bool {
        if self.members.contains(&participant) {
            return false;
        }
        self.members.push(participant);
        true
    }

    pub fn remove_member(&mut self, participant: ParticipantId) -> bool {
        let before = self.members.len();
        self.members.retain(|id| *id != participant);
        before != self.members.len()
    }

    pub fn add_team(&mut self, team: TeamId) -> CategoryResult<bool> {
        match &mut self.kind {
            CategoryKind::Team { teams } => {
                if teams.contains(&team) {
                    return Ok(false);
                }
                teams.push(team);
                Ok(true)
            }
            _ => Err(CategoryError::NotTeamCategory(self.name.clone())),
        }
    }

    /// Who occupies the bracket: the team roster when one exists, otherwise
    /// the individual members.
    #[must_use]
    pub fn contenders(&self) -> Vec<EntrantId> {
        match &self.kind {
            CategoryKind::Team { teams } if !teams.is_empty() => teams.clone(),
            _ => self.members.clone(),
        }
    }

    /// Rules for the timed matches of a head-to-head category
    #[must_use]
    pub fn match_rules(&self) -> Option<&MatchRules> {
        match &self.kind {
            CategoryKind::HeadToHead { rules } => Some(rules),
            _ => None,
        }
    }

    #[must_use]
    pub fn generate_name(&self) -> String {
        if self.age_range.is_senior() {
            return SENIOR_CATEGORY_NAME.to_string();
        }

        let mut parts = Vec::new();
        let ages = self.age_range.to_string();
        if !ages.is_empty() {
            parts.push(ages);
        }
        if self.belts.len() < Belt::ALL.len() {
            parts.extend(self.belts.iter().map(ToString::to_string));
        }

        if parts.is_empty() {
            OPEN_CATEGORY_NAME.to_string()
        } else {
            parts.join(" ")
        }
    }

    pub fn regenerate_name(&mut self) {
        self.name = self.generate_name();
    }

    /// Absorb `other` into this category.
    ///
    /// Members and teams are unioned keeping first-seen order, the age range
    /// widens, belts union and differing sexes become `Unisex`. Disciplines
    /// are not compared here; see `CategoryManager::merge`.
    pub fn merge_with(&mut self, other: &Category) {
        for member in &other.members {
            self.add_member(*member);
        }
        if let (CategoryKind::Team { teams }, CategoryKind::Team { teams: other_teams }) =
            (&mut self.kind, &other.kind)
        {
            for team in other_teams {
                if !teams.contains(team) {
                    teams.push(*team);
                }
            }
        }

        self.age_range = self.age_range.union(&other.age_range);
        self.belts.extend(other.belts.iter().copied());
        if self.sex != other.sex {
            self.sex = Sex::Unisex;
        }
        self.regenerate_name();
    }

    /// A category has started once a bracket exists or a result is in.
    #[must_use]
    pub fn has_started(&self) -> bool {
        !self.matches.is_empty() || !self.results.is_empty()
    }

    /// Winner of the bracket final, once decided
    #[must_use]
    pub fn bracket_winner(&self) -> Option<EntrantId> {
        self.matches.first().and_then(|root| root.winner)
    }

    /// One-line summary used by listings
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {} | ages {} | {} entrants{}",
            self.name,
            self.discipline,
            self.sex,
            if self.age_range == AgeRange::unbounded() {
                "any".to_string()
            } else {
                self.age_range.to_string()
            },
            self.contenders().len(),
            if self.finished { " | finished" } else { "" }
        )
    }
}
