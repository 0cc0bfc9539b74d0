//! Match error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by match operations. A rejected operation never changes
/// the match.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum MatchError {
    #[error("match already finished")]
    AlreadyFinished,
    #[error("match is waiting for contenders")]
    NotReady,
    #[error("match has no clock")]
    NotTimed,
    #[error("scores are tied; start overtime or ask for a decision")]
    Tied,
    #[error("overtime needs tied scores")]
    NotTied,
    #[error("clock still has {remaining_ms} ms left")]
    ClockNotExpired { remaining_ms: u128 },
    #[error("clock has expired")]
    ClockExpired,
}

/// Result type for match operations
pub type MatchResult<T> = Result<T, MatchError>;
