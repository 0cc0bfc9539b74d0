//! Match actor message types.

use std::time::Duration;
use tokio::sync::oneshot;

use crate::{
    bout::{Corner, Match, MatchError},
    entities::EntrantId,
};

/// Messages that can be sent to a MatchActor
#[derive(Debug)]
pub enum MatchCommand {
    /// Score change for one corner (negative deltas correct mistakes)
    AddPoint {
        corner: Corner,
        delta: i32,
        response: oneshot::Sender<MatchResponse>,
    },

    AdjustPenalty {
        corner: Corner,
        delta: i32,
        response: oneshot::Sender<MatchResponse>,
    },

    WithdrawAdvantage {
        response: oneshot::Sender<MatchResponse>,
    },

    StartClock {
        response: oneshot::Sender<MatchResponse>,
    },

    StopClock {
        response: oneshot::Sender<MatchResponse>,
    },

    /// Overwrite the remaining time
    SetClock {
        remaining: Duration,
        response: oneshot::Sender<MatchResponse>,
    },

    ResetClock {
        response: oneshot::Sender<MatchResponse>,
    },

    /// Advance the clock by hand, on top of the periodic tick
    Tick {
        elapsed: Duration,
        response: oneshot::Sender<MatchResponse>,
    },

    Finish {
        response: oneshot::Sender<MatchResponse>,
    },

    StartOvertime {
        response: oneshot::Sender<MatchResponse>,
    },

    /// Referee decision after an unresolved tie
    Decide {
        corner: Corner,
        response: oneshot::Sender<MatchResponse>,
    },

    Disqualify {
        corner: Corner,
        response: oneshot::Sender<MatchResponse>,
    },

    /// Snapshot of the match
    GetState { response: oneshot::Sender<Match> },

    /// Stop the actor and hand back the final match
    Close { response: oneshot::Sender<Match> },
}

/// Reply to a mutating command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResponse {
    Success,
    Score(u32),
    Clock(Duration),
    Advantage(Option<Corner>),
    Finished { winner: EntrantId },
    Rejected(MatchError),
}

impl MatchResponse {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
