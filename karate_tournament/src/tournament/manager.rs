//! Tournament aggregate: registry, categories and competition entry points.

use chrono::Utc;
use log::info;
use thiserror::Error;

use super::models::{SNAPSHOT_FORMAT_VERSION, TournamentSettings, TournamentSnapshot};
use crate::{
    bracket::{self, BracketError, BracketSeeder},
    category::{Category, CategoryError, CategoryKind, CategoryManager},
    entities::{EntrantId, Participant, ParticipantId, Team, TeamId},
    judging::{IndividualCompetition, JudgingError},
};

/// Tournament errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TournamentError {
    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Participant already registered: {0}")]
    AlreadyRegistered(ParticipantId),

    #[error("Team already registered: {0}")]
    TeamAlreadyRegistered(TeamId),

    #[error("Category {0} is judged, not fought in a bracket")]
    NotBracketCategory(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Unsupported snapshot format version {0}")]
    UnsupportedFormat(u32),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Judging(#[from] JudgingError),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// A tournament: who is registered and the categories they compete in
#[derive(Debug, Clone)]
pub struct Tournament {
    settings: TournamentSettings,
    participants: Vec<Participant>,
    teams: Vec<Team>,
    categories: CategoryManager,
}

impl Tournament {
    /// Create an empty tournament
    pub fn new(settings: TournamentSettings) -> TournamentResult<Self> {
        settings
            .validate()
            .map_err(TournamentError::InvalidSettings)?;
        let categories = CategoryManager::new(settings.match_rules.clone());
        Ok(Self {
            settings,
            participants: Vec::new(),
            teams: Vec::new(),
            categories,
        })
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    /// Change how future registrations are bucketed. Existing categories
    /// keep their bounds.
    pub fn set_partitioning(&mut self, by_belt: bool, by_age: bool) {
        self.settings.partition_by_belt = by_belt;
        self.settings.partition_by_age = by_age;
        info!("Partitioning set to belt={by_belt} age={by_age}");
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn categories(&self) -> &CategoryManager {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryManager {
        &mut self.categories
    }

    pub fn category(&self, index: usize) -> TournamentResult<&Category> {
        Ok(self.categories.get(index)?)
    }

    /// Register a participant and assign them to categories
    ///
    /// # Returns
    ///
    /// * `Vec<usize>` - Indices of the categories the participant joined
    pub fn register(&mut self, participant: Participant) -> TournamentResult<Vec<usize>> {
        if self.participant(participant.id).is_some() {
            return Err(TournamentError::AlreadyRegistered(participant.id));
        }

        let placed = self.categories.assign(
            &participant,
            self.settings.partition_by_belt,
            self.settings.partition_by_age,
        );
        info!(
            "Registered {} in {} categories",
            participant.full_name(),
            placed.len()
        );
        self.participants.push(participant);
        Ok(placed)
    }

    /// Replace a participant's record and reassign them.
    ///
    /// Refused while the participant sits in a category that has started.
    pub fn correct_participant(&mut self, updated: Participant) -> TournamentResult<Vec<usize>> {
        let position = self
            .participants
            .iter()
            .position(|p| p.id == updated.id)
            .ok_or(TournamentError::ParticipantNotFound(updated.id))?;

        let previous = self.ensure_not_started(updated.id)?;

        self.categories.remove_participant(updated.id);
        self.categories.remove_emptied(&previous);
        let placed = self.categories.assign(
            &updated,
            self.settings.partition_by_belt,
            self.settings.partition_by_age,
        );
        info!("Corrected {}", updated.full_name());
        self.participants[position] = updated;
        Ok(placed)
    }

    /// Take a participant out of every category. The record is kept.
    ///
    /// Refused while the participant sits in a category that has started.
    pub fn withdraw(&mut self, id: ParticipantId) -> TournamentResult<usize> {
        let participant = self
            .participant(id)
            .ok_or(TournamentError::ParticipantNotFound(id))?;
        let name = participant.full_name();
        self.ensure_not_started(id)?;
        let removed = self.categories.remove_participant(id);
        info!("Withdrew {name} from {removed} categories");
        Ok(removed)
    }

    /// Indices of the categories `id` competes in, or an error naming the
    /// first of them that has started.
    fn ensure_not_started(&self, id: ParticipantId) -> TournamentResult<Vec<usize>> {
        let indices = self.categories.categories_for(id);
        for &index in &indices {
            let category = self.categories.get(index)?;
            if category.has_started() {
                return Err(CategoryError::AlreadyStarted(category.name.clone()).into());
            }
        }
        Ok(indices)
    }

    /// Register a team and place it in a team category
    pub fn register_team(&mut self, team: Team) -> TournamentResult<usize> {
        if self.team(team.id).is_some() {
            return Err(TournamentError::TeamAlreadyRegistered(team.id));
        }
        let index = self.categories.assign_team(&team)?;
        info!("Registered team {}", team.name);
        self.teams.push(team);
        Ok(index)
    }

    /// Merge category `source` into `target`; returns the merged index
    pub fn merge_categories(&mut self, target: usize, source: usize) -> TournamentResult<usize> {
        Ok(self.categories.merge(target, source)?)
    }

    /// Draw the bracket of a head-to-head or team category
    pub fn open_bracket(
        &mut self,
        index: usize,
        seeder: &mut BracketSeeder,
    ) -> TournamentResult<usize> {
        let category = self.categories.get_mut(index)?;
        if category.kind == CategoryKind::Judged {
            return Err(TournamentError::NotBracketCategory(category.name.clone()));
        }
        Ok(bracket::initialize_bracket(category, seeder))
    }

    /// Start (or resume) the judged round of a category
    pub fn open_judging(&mut self, index: usize) -> TournamentResult<IndividualCompetition<'_>> {
        let settings = self.settings.judging.clone();
        let category = self.categories.get_mut(index)?;
        Ok(IndividualCompetition::open(category, settings)?)
    }

    /// Display name of whoever occupies a corner
    pub fn entrant_name(&self, id: EntrantId) -> Option<String> {
        self.participant(id)
            .map(Participant::full_name)
            .or_else(|| self.team(id).map(|t| t.name.clone()))
    }

    /// Capture the full tournament state
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: Utc::now(),
            settings: self.settings.clone(),
            participants: self.participants.clone(),
            teams: self.teams.clone(),
            categories: self.categories.categories().to_vec(),
        }
    }

    /// Restore a tournament from a snapshot
    pub fn from_snapshot(snapshot: TournamentSnapshot) -> TournamentResult<Self> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(TournamentError::UnsupportedFormat(snapshot.format_version));
        }
        snapshot
            .settings
            .validate()
            .map_err(TournamentError::InvalidSettings)?;

        let categories = CategoryManager::from_categories(
            snapshot.categories,
            snapshot.settings.match_rules.clone(),
        );
        Ok(Self {
            settings: snapshot.settings,
            participants: snapshot.participants,
            teams: snapshot.teams,
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Belt, Discipline, Sex};

    fn tournament() -> Tournament {
        Tournament::new(TournamentSettings::new("Spring Cup")).unwrap()
    }

    fn entrant(first: &str, age: u8, discipline: Discipline) -> Participant {
        Participant::new(first, "Test", age, Belt::Kyu5, Sex::Female).with_disciplines([discipline])
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            Tournament::new(TournamentSettings::new("")),
            Err(TournamentError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_register_assigns_categories() {
        let mut t = tournament();
        let p = entrant("Ala", 9, Discipline::Kata);
        let id = p.id;
        assert_eq!(t.register(p.clone()), Ok(vec![0]));
        assert_eq!(t.register(p), Err(TournamentError::AlreadyRegistered(id)));
        assert_eq!(t.category(0).unwrap().name, "9 Kyu5");
        assert_eq!(t.entrant_name(id), Some("Ala Test".to_string()));
    }

    #[test]
    fn test_correct_participant_moves_category() {
        let mut t = tournament();
        let p = entrant("Ala", 9, Discipline::Kata);
        t.register(p.clone()).unwrap();

        let mut older = p.clone();
        older.age = 10;
        assert_eq!(t.correct_participant(older), Ok(vec![0]));
        assert_eq!(t.categories().len(), 1);
        assert_eq!(t.category(0).unwrap().name, "10 Kyu5");
        assert_eq!(t.participant(p.id).unwrap().age, 10);
    }

    #[test]
    fn test_correct_refused_after_start() {
        let mut t = tournament();
        let a = entrant("Ala", 9, Discipline::Kumite);
        let b = entrant("Ola", 9, Discipline::Kumite);
        t.register(a.clone()).unwrap();
        t.register(b).unwrap();
        t.open_bracket(0, &mut BracketSeeder::from_seed(1)).unwrap();

        assert!(matches!(
            t.correct_participant(a),
            Err(TournamentError::Category(CategoryError::AlreadyStarted(_)))
        ));
    }

    #[test]
    fn test_partitioning_applies_to_new_registrations() {
        let mut t = tournament();
        t.register(entrant("Ala", 9, Discipline::Kata)).unwrap();
        t.set_partitioning(false, false);
        assert_eq!(t.register(entrant("Ola", 12, Discipline::Kata)), Ok(vec![1]));
        assert_eq!(t.category(0).unwrap().name, "9 Kyu5");
        assert_eq!(t.category(1).unwrap().name, "Open");
    }

    #[test]
    fn test_withdraw_keeps_record() {
        let mut t = tournament();
        let p = entrant("Ala", 9, Discipline::Kata);
        t.register(p.clone()).unwrap();
        assert_eq!(t.withdraw(p.id), Ok(1));
        assert!(t.category(0).unwrap().members.is_empty());
        assert!(t.participant(p.id).is_some());
    }

    #[test]
    fn test_withdraw_refused_after_judging_starts() {
        let mut t = tournament();
        let ids: Vec<_> = ["Ala", "Ola", "Ela"]
            .into_iter()
            .map(|name| {
                let p = entrant(name, 9, Discipline::Kata);
                let id = p.id;
                t.register(p).unwrap();
                id
            })
            .collect();

        let mut round = t.open_judging(0).unwrap();
        for mark in [5.0, 6.0, 7.0] {
            round.add_score(mark).unwrap();
        }
        round.finish_current().unwrap();

        assert!(matches!(
            t.withdraw(ids[0]),
            Err(TournamentError::Category(CategoryError::AlreadyStarted(_)))
        ));
        assert!(matches!(
            t.withdraw(ids[2]),
            Err(TournamentError::Category(CategoryError::AlreadyStarted(_)))
        ));
        assert_eq!(t.category(0).unwrap().members, ids);
        assert_eq!(t.open_judging(0).unwrap().current(), Some(ids[1]));
    }

    #[test]
    fn test_correction_keeps_unrelated_empty_categories() {
        let mut t = tournament();
        let withdrawn = entrant("Ola", 9, Discipline::Kumite);
        let corrected = entrant("Ala", 9, Discipline::Kata);
        t.register(withdrawn.clone()).unwrap();
        t.register(corrected.clone()).unwrap();
        t.withdraw(withdrawn.id).unwrap();

        let mut older = corrected;
        older.age = 10;
        assert_eq!(t.correct_participant(older), Ok(vec![1]));

        // Only the category the correction emptied is gone.
        assert_eq!(t.categories().len(), 2);
        let kept = t.category(0).unwrap();
        assert_eq!(kept.discipline, Discipline::Kumite);
        assert!(kept.members.is_empty());
        assert_eq!(t.category(1).unwrap().name, "10 Kyu5");
    }

    #[test]
    fn test_bracket_only_for_fought_categories() {
        let mut t = tournament();
        t.register(entrant("Ala", 9, Discipline::Kata)).unwrap();
        assert!(matches!(
            t.open_bracket(0, &mut BracketSeeder::from_seed(1)),
            Err(TournamentError::NotBracketCategory(_))
        ));
        assert!(t.open_judging(0).is_ok());
    }

    #[test]
    fn test_team_registration() {
        let mut t = tournament();
        let mut team = Team::new("Dojo A", Sex::Female);
        team.add_member(entrant("Ala", 14, Discipline::Team));
        let id = team.id;
        assert_eq!(t.register_team(team.clone()), Ok(0));
        assert_eq!(
            t.register_team(team),
            Err(TournamentError::TeamAlreadyRegistered(id))
        );
        assert_eq!(t.entrant_name(id), Some("Dojo A".to_string()));
    }

    #[test]
    fn test_snapshot_restores_state() {
        let mut t = tournament();
        t.register(entrant("Ala", 9, Discipline::Kata)).unwrap();
        t.register(entrant("Ola", 9, Discipline::Kumite)).unwrap();

        let snapshot = t.snapshot();
        assert_eq!(snapshot.format_version, SNAPSHOT_FORMAT_VERSION);
        let restored = Tournament::from_snapshot(snapshot.clone()).unwrap();
        assert_eq!(restored.participants(), t.participants());
        assert_eq!(restored.categories().categories(), t.categories().categories());

        let mut future = snapshot;
        future.format_version = 99;
        assert_eq!(
            Tournament::from_snapshot(future).err(),
            Some(TournamentError::UnsupportedFormat(99))
        );
    }
}
