//! Tournament aggregate.
//!
//! This module ties the engines together:
//! - Participant and team registration
//! - Category assignment, correction and merging
//! - Opening brackets and judged rounds
//! - Snapshots for persistence
//!
//! ## Example
//!
//! ```
//! use karate_tournament::{
//!     bracket::BracketSeeder,
//!     entities::{Belt, Discipline, Participant, Sex},
//!     tournament::{Tournament, TournamentSettings},
//! };
//!
//! let mut tournament = Tournament::new(TournamentSettings::new("Spring Cup")).unwrap();
//! for first in ["Ala", "Ola", "Ela"] {
//!     let p = Participant::new(first, "Nowak", 12, Belt::Kyu4, Sex::Female)
//!         .with_disciplines([Discipline::Kumite]);
//!     tournament.register(p).unwrap();
//! }
//!
//! let nodes = tournament
//!     .open_bracket(0, &mut BracketSeeder::from_seed(7))
//!     .unwrap();
//! assert_eq!(nodes, 7);
//! ```

pub mod manager;
pub mod models;

pub use manager::{Tournament, TournamentError, TournamentResult};
pub use models::{SNAPSHOT_FORMAT_VERSION, TournamentSettings, TournamentSnapshot};
