//! Sequential judged performances.

use log::info;

use super::{
    config::JudgingSettings,
    errors::{JudgingError, JudgingResult, RankingResult},
    ranking::{Standings, final_rankings},
    scoring::{ParticipantResult, Score, final_score},
};
use crate::{
    category::{Category, CategoryKind},
    decision::ManualDecision,
    entities::ParticipantId,
};

/// Walks a judged category's members in order, collecting the panel's
/// marks for whoever is on the mat.
///
/// The cursor is the number of results already in the category, so a
/// category loaded from a snapshot resumes with the next performer.
pub struct IndividualCompetition<'c> {
    category: &'c mut Category,
    settings: JudgingSettings,
    scores: Vec<Score>,
}

impl<'c> IndividualCompetition<'c> {
    pub fn open(category: &'c mut Category, settings: JudgingSettings) -> JudgingResult<Self> {
        if category.kind != CategoryKind::Judged {
            return Err(JudgingError::WrongKind(category.name.clone()));
        }
        if category.results.len() >= category.members.len() && !category.finished {
            category.finished = true;
            info!("Category {} finished", category.name);
        }

        Ok(Self {
            category,
            settings,
            scores: Vec::new(),
        })
    }

    /// Participant currently performing
    #[must_use]
    pub fn current(&self) -> Option<ParticipantId> {
        self.category.members.get(self.position()).copied()
    }

    /// Number of performances already scored
    #[must_use]
    pub fn position(&self) -> usize {
        self.category.results.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.category.members.len().saturating_sub(self.position())
    }

    #[must_use]
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// Record one judge's mark. Returns how many marks are in.
    pub fn add_score(&mut self, points: f64) -> JudgingResult<usize> {
        if self.current().is_none() {
            return Err(JudgingError::CompetitionFinished);
        }
        self.scores.push(Score::judge(points)?);
        Ok(self.scores.len())
    }

    pub fn remove_last_score(&mut self) -> Option<Score> {
        self.scores.pop()
    }

    /// Trimmed score of the marks given so far
    #[must_use]
    pub fn provisional_score(&self) -> Score {
        final_score(&self.scores)
    }

    /// Close the current performance and move to the next performer.
    pub fn finish_current(&mut self) -> JudgingResult<ParticipantResult> {
        let participant = self.current().ok_or(JudgingError::CompetitionFinished)?;
        if self.scores.len() < self.settings.min_judges {
            return Err(JudgingError::NotEnoughScores {
                have: self.scores.len(),
                need: self.settings.min_judges,
            });
        }

        let result = ParticipantResult::new(participant, std::mem::take(&mut self.scores));
        self.category.results.push(result.clone());

        if self.remaining() == 0 {
            self.category.finished = true;
            info!("Category {} finished", self.category.name);
        }
        Ok(result)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.category.finished
    }

    pub fn rankings(&self, decider: &mut dyn ManualDecision) -> RankingResult<Standings> {
        final_rankings(&self.category.results, decider)
    }
}
