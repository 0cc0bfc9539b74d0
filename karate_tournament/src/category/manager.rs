//! Category assignment and merging.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{
    errors::{CategoryError, CategoryResult},
    models::{AgeRange, Category},
};
use crate::{
    bout::MatchRules,
    constants::SENIOR_MIN_AGE,
    entities::{Belt, Discipline, EntrantId, Participant, Team},
};

/// Owns every category of a tournament and places entrants into them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryManager {
    categories: Vec<Category>,

    /// Rules copied into newly created head-to-head categories
    match_rules: MatchRules,
}

impl CategoryManager {
    #[must_use]
    pub fn new(match_rules: MatchRules) -> Self {
        Self {
            categories: Vec::new(),
            match_rules,
        }
    }

    /// Rebuild a manager around categories loaded from a snapshot
    #[must_use]
    pub fn from_categories(categories: Vec<Category>, match_rules: MatchRules) -> Self {
        Self {
            categories,
            match_rules,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, index: usize) -> CategoryResult<&Category> {
        self.categories
            .get(index)
            .ok_or(CategoryError::NotFound(index))
    }

    pub fn get_mut(&mut self, index: usize) -> CategoryResult<&mut Category> {
        self.categories
            .get_mut(index)
            .ok_or(CategoryError::NotFound(index))
    }

    /// Place `participant` into one category per entered discipline.
    ///
    /// An existing category that admits the participant is reused; otherwise
    /// a new one is created from the bucket the partition flags select.
    /// Returns the indices of the categories the participant ended up in.
    pub fn assign(
        &mut self,
        participant: &Participant,
        partition_by_belt: bool,
        partition_by_age: bool,
    ) -> Vec<usize> {
        let mut placed = Vec::with_capacity(participant.disciplines.len());

        for &discipline in &participant.disciplines {
            let index = match self
                .categories
                .iter()
                .position(|c| c.admits(participant, discipline))
            {
                Some(index) => index,
                None => {
                    let (age_range, belts) =
                        bucket_for(participant, partition_by_belt, partition_by_age);
                    let category = Category::new(
                        discipline,
                        participant.sex,
                        age_range,
                        belts,
                        &self.match_rules,
                    );
                    info!(
                        "Created category {} ({discipline}, {})",
                        category.name, category.sex
                    );
                    self.categories.push(category);
                    self.categories.len() - 1
                }
            };

            if self.categories[index].add_member(participant.id) {
                debug!(
                    "{} assigned to {} ({discipline})",
                    participant.full_name(),
                    self.categories[index].name
                );
            }
            placed.push(index);
        }

        placed
    }

    /// Place a team into a team category of its sex and age group.
    pub fn assign_team(&mut self, team: &Team) -> CategoryResult<usize> {
        let index = match self.categories.iter().position(|c| c.admits_team(team)) {
            Some(index) => index,
            None => {
                let age_range = if team.age() >= SENIOR_MIN_AGE {
                    AgeRange::seniors()
                } else {
                    AgeRange::juniors()
                };
                let category = Category::new(
                    Discipline::Team,
                    team.sex,
                    age_range,
                    Belt::all(),
                    &self.match_rules,
                );
                info!("Created team category {} ({})", category.name, category.sex);
                self.categories.push(category);
                self.categories.len() - 1
            }
        };

        self.categories[index].add_team(team.id)?;
        Ok(index)
    }

    /// Merge the category at `source` into the one at `target`.
    ///
    /// The source category is removed. Returns the target's index after the
    /// removal.
    pub fn merge(&mut self, target: usize, source: usize) -> CategoryResult<usize> {
        if target == source {
            return Err(CategoryError::SameCategory);
        }
        let target_category = self.get(target)?;
        let source_category = self.get(source)?;

        if target_category.discipline != source_category.discipline {
            return Err(CategoryError::DisciplineMismatch {
                target: target_category.name.clone(),
                merged: source_category.name.clone(),
            });
        }
        for category in [target_category, source_category] {
            if category.has_started() {
                return Err(CategoryError::AlreadyStarted(category.name.clone()));
            }
        }

        let absorbed = self.categories.remove(source);
        let target = if source < target { target - 1 } else { target };
        let merged = &mut self.categories[target];
        merged.merge_with(&absorbed);
        info!("Merged {} into {}", absorbed.name, merged.name);
        Ok(target)
    }

    /// Drop a participant from every category. Returns how many categories
    /// lost a member.
    pub fn remove_participant(&mut self, participant: EntrantId) -> usize {
        self.categories
            .iter_mut()
            .map(|c| c.remove_member(participant))
            .filter(|removed| *removed)
            .count()
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    /// Indices of the categories listing `entrant` as a member or team
    #[must_use]
    pub fn categories_for(&self, entrant: EntrantId) -> Vec<usize> {
        self.categories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.members.contains(&entrant) || c.contenders().contains(&entrant))
            .map(|(index, _)| index)
            .collect()
    }

    /// Remove categories nobody competes in. Categories that have started
    /// keep their history and stay. Returns how many were removed.
    pub fn remove_empty(&mut self) -> usize {
        let before = self.categories.len();
        self.categories
            .retain(|c| c.has_started() || !c.contenders().is_empty());
        before - self.categories.len()
    }

    /// Like [`remove_empty`](Self::remove_empty), limited to `indices`.
    /// Returns how many were removed.
    pub fn remove_emptied(&mut self, indices: &[usize]) -> usize {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();

        let mut removed = 0;
        for index in indices.into_iter().rev() {
            let Some(category) = self.categories.get(index) else {
                continue;
            };
            if category.has_started() || !category.contenders().is_empty() {
                continue;
            }
            let category = self.categories.remove(index);
            debug!("Removed empty category {}", category.name);
            removed += 1;
        }
        removed
    }
}

/// Age range and belt set of the bucket a new category is created for.
fn bucket_for(
    participant: &Participant,
    partition_by_belt: bool,
    partition_by_age: bool,
) -> (AgeRange, BTreeSet<Belt>) {
    let single_belt = || BTreeSet::from([participant.belt]);
    let senior = participant.is_senior();

    match (partition_by_belt, partition_by_age) {
        (true, true) if senior => (AgeRange::seniors(), Belt::all()),
        (true, true) => (AgeRange::exact(participant.age), single_belt()),
        (false, true) if senior => (AgeRange::seniors(), Belt::all()),
        (false, true) => (AgeRange::exact(participant.age), Belt::all()),
        (true, false) if senior => (AgeRange::seniors(), single_belt()),
        (true, false) => (AgeRange::juniors(), single_belt()),
        (false, false) => (AgeRange::unbounded(), Belt::all()),
    }
}
