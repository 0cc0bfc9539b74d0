use thiserror::Error;

use crate::bout::MatchId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiveMatchError {
    #[error("match {0} is not live")]
    NotFound(MatchId),

    #[error("match {0} is already live")]
    AlreadyLive(MatchId),

    #[error("match {0} has no clock to run")]
    NotTimed(MatchId),

    #[error("match {0} is closed")]
    Closed(MatchId),

    #[error("invalid live match configuration: {0}")]
    InvalidConfig(String),
}

pub type LiveMatchResult<T> = Result<T, LiveMatchError>;
