//! Judge scores and trimmed results.

use serde::{Deserialize, Serialize};
use std::{fmt, iter::Sum};

use super::errors::{JudgingError, JudgingResult};
use crate::{constants::MAX_JUDGE_SCORE_TENTHS, entities::EntrantId};

/// A score in tenths of a point. Integer storage keeps sums and tie checks
/// exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    /// A single judge's mark, rounded to the nearest tenth.
    pub fn judge(points: f64) -> JudgingResult<Self> {
        if !points.is_finite() || points < 0.0 {
            return Err(JudgingError::ScoreOutOfRange(points));
        }
        let tenths = (points * 10.0).round();
        if tenths > f64::from(MAX_JUDGE_SCORE_TENTHS) {
            return Err(JudgingError::ScoreOutOfRange(points));
        }
        // In range 0..=100 after the checks above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let tenths = tenths as u32;
        Ok(Self(tenths))
    }

    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    #[must_use]
    pub const fn tenths(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn points(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|s| s.0).sum())
    }
}

impl<'a> Sum<&'a Score> for Score {
    fn sum<I: Iterator<Item = &'a Score>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Scores with one lowest and one highest mark removed, ascending.
#[must_use]
pub fn trimmed(scores: &[Score]) -> Vec<Score> {
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    if sorted.len() < 2 {
        return Vec::new();
    }
    sorted[1..sorted.len() - 1].to_vec()
}

/// Sum of the trimmed marks.
#[must_use]
pub fn final_score(scores: &[Score]) -> Score {
    trimmed(scores).iter().sum()
}

/// A finished performance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResult {
    pub participant: EntrantId,
    /// Marks in the order the judges gave them
    pub judge_scores: Vec<Score>,
    pub score: Score,
}

impl ParticipantResult {
    #[must_use]
    pub fn new(participant: EntrantId, judge_scores: Vec<Score>) -> Self {
        let score = final_score(&judge_scores);
        Self {
            participant,
            judge_scores,
            score,
        }
    }

    /// Highest mark that survived trimming
    #[must_use]
    pub fn trimmed_max(&self) -> Option<Score> {
        trimmed(&self.judge_scores).last().copied()
    }

    /// Lowest mark that survived trimming
    #[must_use]
    pub fn trimmed_min(&self) -> Option<Score> {
        trimmed(&self.judge_scores).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn marks(points: &[f64]) -> Vec<Score> {
        points.iter().map(|p| Score::judge(*p).unwrap()).collect()
    }

    #[test]
    fn test_judge_score_bounds() {
        assert_eq!(Score::judge(0.0), Ok(Score::from_tenths(0)));
        assert_eq!(Score::judge(10.0), Ok(Score::from_tenths(100)));
        assert_eq!(Score::judge(7.25).unwrap().tenths(), 73);
        assert!(Score::judge(10.1).is_err());
        assert!(Score::judge(-0.5).is_err());
        assert!(Score::judge(f64::NAN).is_err());
    }

    #[test]
    fn test_trimmed_sum() {
        assert_eq!(final_score(&marks(&[4.0, 5.0, 10.0, 6.0])), Score::from_tenths(110));
        assert_eq!(final_score(&marks(&[7.0, 7.0, 7.0])), Score::from_tenths(70));
        assert_eq!(final_score(&marks(&[8.5, 9.0, 7.5])), Score::from_tenths(85));
        assert_eq!(final_score(&marks(&[9.0])), Score::default());
    }

    #[test]
    fn test_trimmed_extremes() {
        let result = ParticipantResult::new(Uuid::new_v4(), marks(&[6.0, 9.5, 8.0, 7.0, 3.0]));
        assert_eq!(result.trimmed_max(), Some(Score::from_tenths(80)));
        assert_eq!(result.trimmed_min(), Some(Score::from_tenths(60)));
        assert_eq!(result.score, Score::from_tenths(210));
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::from_tenths(215).to_string(), "21.5");
        assert_eq!(Score::from_tenths(7).to_string(), "0.7");
    }
}
