//! Judged disciplines: panel scores, trimmed totals and standings.

pub mod competition;
pub mod config;
pub mod errors;
pub mod ranking;
pub mod scoring;

pub use competition::IndividualCompetition;
pub use config::JudgingSettings;
pub use errors::{JudgingError, JudgingResult, RankingError, RankingResult};
pub use ranking::{PendingDecision, Standings, final_rankings};
pub use scoring::{ParticipantResult, Score, final_score, trimmed};
