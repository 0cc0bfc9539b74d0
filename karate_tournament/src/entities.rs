use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::SENIOR_MIN_AGE;

/// Identifier of anything that can occupy a corner: a participant or a team.
pub type EntrantId = Uuid;

/// Participant identifier.
pub type ParticipantId = EntrantId;

/// Team identifier.
pub type TeamId = EntrantId;

/// Errors raised when parsing entity labels from external sources.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseEntityError {
    #[error("unknown belt: {0}")]
    Belt(String),
    #[error("unknown sex: {0}")]
    Sex(String),
    #[error("unknown discipline: {0}")]
    Discipline(String),
}

/// Belt rank. The ordinal is the rank number: `Dan` (0) is the highest,
/// `Kyu10` the lowest.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Belt {
    Dan,
    Kyu1,
    Kyu2,
    Kyu3,
    Kyu4,
    Kyu5,
    Kyu6,
    Kyu7,
    Kyu8,
    Kyu9,
    Kyu10,
}

impl Belt {
    pub const ALL: [Belt; 11] = [
        Belt::Dan,
        Belt::Kyu1,
        Belt::Kyu2,
        Belt::Kyu3,
        Belt::Kyu4,
        Belt::Kyu5,
        Belt::Kyu6,
        Belt::Kyu7,
        Belt::Kyu8,
        Belt::Kyu9,
        Belt::Kyu10,
    ];

    /// Ordinal rank, 0 = Dan.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// The full belt set used by catch-all categories.
    #[must_use]
    pub fn all() -> BTreeSet<Belt> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Belt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dan => write!(f, "Dan"),
            kyu => write!(f, "Kyu{}", kyu.rank()),
        }
    }
}

impl FromStr for Belt {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        if label == "dan" {
            return Ok(Self::Dan);
        }
        label
            .strip_prefix("kyu")
            .unwrap_or(label.as_str())
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_rank)
            .ok_or_else(|| ParseEntityError::Belt(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Sex {
    Male,
    Female,
    Unisex,
}

impl Sex {
    /// Whether a category with this sex filter admits `other`.
    #[must_use]
    pub fn admits(self, other: Sex) -> bool {
        self == Sex::Unisex || self == other
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unisex => "Unisex",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Sex {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "unisex" | "mixed" => Ok(Self::Unisex),
            _ => Err(ParseEntityError::Sex(s.to_string())),
        }
    }
}

/// Competition discipline. Kumite is fought head-to-head on the clock,
/// Team is contested by teams, everything else is judged.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Discipline {
    Kata,
    Kumite,
    Kihon,
    KobudoShort,
    KobudoLong,
    Grappling,
    Team,
}

impl Discipline {
    pub const ALL: [Discipline; 7] = [
        Discipline::Kata,
        Discipline::Kumite,
        Discipline::Kihon,
        Discipline::KobudoShort,
        Discipline::KobudoLong,
        Discipline::Grappling,
        Discipline::Team,
    ];

    #[must_use]
    pub fn is_head_to_head(self) -> bool {
        self == Discipline::Kumite
    }

    #[must_use]
    pub fn is_team(self) -> bool {
        self == Discipline::Team
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Kata => "Kata",
            Self::Kumite => "Kumite",
            Self::Kihon => "Kihon",
            Self::KobudoShort => "Kobudo (Short)",
            Self::KobudoLong => "Kobudo (Long)",
            Self::Grappling => "Grappling",
            Self::Team => "Team",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Discipline {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "kata" => Ok(Self::Kata),
            "kumite" => Ok(Self::Kumite),
            "kihon" => Ok(Self::Kihon),
            "kobudoshort" => Ok(Self::KobudoShort),
            "kobudolong" => Ok(Self::KobudoLong),
            "grappling" => Ok(Self::Grappling),
            "team" => Ok(Self::Team),
            _ => Err(ParseEntityError::Discipline(s.to_string())),
        }
    }
}

/// A registered competitor.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub belt: Belt,
    pub sex: Sex,
    pub club: Option<String>,
    pub disciplines: BTreeSet<Discipline>,
}

impl Participant {
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, age: u8, belt: Belt, sex: Sex) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            belt,
            sex,
            club: None,
            disciplines: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_club(mut self, club: &str) -> Self {
        self.club = Some(club.to_string());
        self
    }

    #[must_use]
    pub fn with_disciplines(mut self, disciplines: impl IntoIterator<Item = Discipline>) -> Self {
        self.disciplines.extend(disciplines);
        self
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub fn is_senior(&self) -> bool {
        self.age >= SENIOR_MIN_AGE
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {}, {})", self.full_name(), self.age, self.belt, self.sex)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub sex: Sex,
    pub members: Vec<Participant>,
}

impl Team {
    #[must_use]
    pub fn new(name: &str, sex: Sex) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sex,
            members: Vec::new(),
        }
    }

    pub fn add_member(&mut self, participant: Participant) {
        if !self.members.iter().any(|m| m.id == participant.id) {
            self.members.push(participant);
        }
    }

    /// A team competes at the age of its oldest member.
    #[must_use]
    pub fn age(&self) -> u8 {
        self.members.iter().map(|m| m.age).max().unwrap_or(0)
    }
}
