//! Judging and ranking error types.

use thiserror::Error;

use crate::entities::EntrantId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JudgingError {
    #[error("category {0} is not judged")]
    WrongKind(String),

    #[error("judge score {0} outside 0-10")]
    ScoreOutOfRange(f64),

    #[error("{have} scores recorded, {need} needed")]
    NotEnoughScores { have: usize, need: usize },

    #[error("every performance has been scored")]
    CompetitionFinished,
}

pub type JudgingResult<T> = Result<T, JudgingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("decision names {0}, who is not part of the tie")]
    InvalidDecision(EntrantId),
}

pub type RankingResult<T> = Result<T, RankingError>;
