//! Single-elimination brackets.

pub mod engine;
pub mod errors;
pub mod seeding;

pub use engine::{
    bracket_size, disqualify, finish_match, initialize_bracket, leaf_count, next_ready_match,
    parent_index, promote_winner, record_match, resolve_match,
};
pub use errors::{BracketError, BracketResult};
pub use seeding::BracketSeeder;
