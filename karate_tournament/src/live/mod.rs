//! Live matches driven by several clients at once.
//!
//! Each live match runs in its own tokio task (the actor) that owns the
//! [`Match`](crate::bout::Match), applies commands from its inbox in order
//! and advances the clock on a periodic tick.

pub mod actor;
pub mod config;
pub mod errors;
pub mod manager;
pub mod messages;

pub use actor::{MatchActor, MatchHandle};
pub use config::LiveMatchConfig;
pub use errors::{LiveMatchError, LiveMatchResult};
pub use manager::LiveMatchManager;
pub use messages::{MatchCommand, MatchResponse};
