//! Final standings of a judged category.

use log::debug;
use std::cmp::Ordering;

use super::{
    errors::{RankingError, RankingResult},
    scoring::ParticipantResult,
};
use crate::{decision::ManualDecision, entities::EntrantId};

/// Medal positions whose ties are broken; further places keep score order.
const TIE_BREAK_PAIRS: [(usize, usize); 2] = [(0, 1), (1, 2)];

/// A tie the cascade could not break on marks alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDecision {
    /// Position of the upper entrant in the provisional order
    pub upper: usize,
    pub lower: usize,
    pub first: EntrantId,
    pub second: EntrantId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Standings {
    Final(Vec<ParticipantResult>),
    /// The manual decision deferred; pairs after `pending` were not examined.
    AwaitingDecision {
        provisional: Vec<ParticipantResult>,
        pending: PendingDecision,
    },
}

impl Standings {
    /// Ordered results, final or provisional
    #[must_use]
    pub fn results(&self) -> &[ParticipantResult] {
        match self {
            Self::Final(results) => results,
            Self::AwaitingDecision { provisional, .. } => provisional,
        }
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }
}

/// Rank results by trimmed score, breaking medal ties by the higher
/// remaining top mark, then the higher remaining bottom mark, then
/// `decider`.
pub fn final_rankings(
    results: &[ParticipantResult],
    decider: &mut dyn ManualDecision,
) -> RankingResult<Standings> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    for (upper, lower) in TIE_BREAK_PAIRS {
        if lower >= ranked.len() || ranked[upper].score != ranked[lower].score {
            continue;
        }

        let order = compare_marks(&ranked[upper], &ranked[lower]);
        match order {
            Ordering::Greater => {}
            Ordering::Less => ranked.swap(upper, lower),
            Ordering::Equal => {
                let first = ranked[upper].participant;
                let second = ranked[lower].participant;
                match decider.decide(first, second) {
                    Some(winner) if winner == first => {}
                    Some(winner) if winner == second => ranked.swap(upper, lower),
                    Some(other) => return Err(RankingError::InvalidDecision(other)),
                    None => {
                        debug!("Tie between {first} and {second} awaits a decision");
                        return Ok(Standings::AwaitingDecision {
                            provisional: ranked,
                            pending: PendingDecision {
                                upper,
                                lower,
                                first,
                                second,
                            },
                        });
                    }
                }
            }
        }
    }

    Ok(Standings::Final(ranked))
}

fn compare_marks(a: &ParticipantResult, b: &ParticipantResult) -> Ordering {
    a.trimmed_max()
        .cmp(&b.trimmed_max())
        .then_with(|| a.trimmed_min().cmp(&b.trimmed_min()))
}
