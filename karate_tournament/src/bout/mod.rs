//! Head-to-head match engine.
//!
//! A [`Match`] is either a plain points match or a timed bout carrying a
//! clock, penalties, the first-score advantage and overtime segments. The
//! state machine is synchronous; the `live` module runs it behind an actor
//! when several clients drive the same match.

pub mod errors;
pub mod models;
mod state_machine;

pub use errors::{MatchError, MatchResult};
pub use models::{
    Corner, DecidedBy, Match, MatchId, MatchKind, MatchPhase, MatchRules, TimedState,
};
