use thiserror::Error;

use crate::{bout::MatchError, bout::MatchId, entities::EntrantId};

/// Bracket errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    #[error("bracket has no node {index} (size {size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("match {0} has no winner yet")]
    NoWinner(usize),

    #[error("match {0} already finished, cannot seat a winner")]
    ParentFinished(usize),

    #[error("{0} is not fighting in this match")]
    NotAContender(EntrantId),

    #[error("node {index} holds match {expected}, not {found}")]
    MatchIdMismatch {
        index: usize,
        expected: MatchId,
        found: MatchId,
    },

    #[error(transparent)]
    Match(#[from] MatchError),
}

pub type BracketResult<T> = Result<T, BracketError>;
