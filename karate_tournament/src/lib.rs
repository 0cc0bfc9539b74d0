//! # Karate Tournament
//!
//! Engines for running a karate tournament: placing entrants into
//! categories, drawing single-elimination brackets, scoring timed bouts and
//! ranking judged performances.
//!
//! ## Architecture
//!
//! Everything is plain synchronous state mutated through `&mut self`
//! operations that either succeed or leave the state untouched:
//!
//! - **Assignment**: [`category::CategoryManager`] buckets participants by
//!   age, belt, sex and discipline, creating categories on demand
//! - **Brackets**: [`bracket`] builds a flat binary tree over a category's
//!   contenders, resolves byes and promotes winners toward the final
//! - **Bouts**: [`bout::Match`] is the head-to-head state machine with
//!   clock, penalties, first-score advantage and overtime
//! - **Judging**: [`judging`] collects panel marks, computes trimmed totals
//!   and ranks with a tie-break cascade
//!
//! Ties the rules cannot break are handed to a [`decision::ManualDecision`].
//! The [`live`] module runs a bout behind a tokio actor for multi-client
//! scoring, and [`persistence`] stores [`tournament::TournamentSnapshot`]s.
//!
//! ## Example
//!
//! ```
//! use karate_tournament::{Belt, Corner, Discipline, Participant, Sex, Tournament, TournamentSettings};
//! use karate_tournament::bracket::{self, BracketSeeder};
//!
//! let mut tournament = Tournament::new(TournamentSettings::default()).unwrap();
//! for first in ["Jan", "Piotr"] {
//!     let p = Participant::new(first, "Nowak", 30, Belt::Dan, Sex::Male)
//!         .with_disciplines([Discipline::Kumite]);
//!     tournament.register(p).unwrap();
//! }
//!
//! tournament.open_bracket(0, &mut BracketSeeder::from_seed(1)).unwrap();
//! let category = tournament.categories_mut().get_mut(0).unwrap();
//! let index = bracket::next_ready_match(category).unwrap();
//! category.matches[index].add_point(Corner::Aka, 2).unwrap();
//! bracket::finish_match(category, index).unwrap();
//! assert!(category.finished);
//! ```

pub mod bout;
pub mod bracket;
pub mod category;
pub mod constants;
pub mod decision;
pub mod entities;
pub mod import;
pub mod judging;
pub mod live;
pub mod persistence;
pub mod tournament;

pub use bout::{Corner, Match, MatchError, MatchRules};
pub use category::{Category, CategoryManager};
pub use decision::{ManualDecision, NoDecision};
pub use entities::{Belt, Discipline, Participant, Sex, Team};
pub use tournament::{Tournament, TournamentError, TournamentSettings};
