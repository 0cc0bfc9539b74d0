//! Manual decisions for ties the rules cannot break.
//!
//! The engines never guess. When scores, marks and advantage all leave two
//! entrants level they ask a [`ManualDecision`], which in practice is the
//! referee panel behind whatever front end hosts the engine.

use std::collections::HashMap;

use crate::entities::EntrantId;

pub trait ManualDecision {
    /// Pick the winner between `first` and `second`, or `None` to defer.
    fn decide(&mut self, first: EntrantId, second: EntrantId) -> Option<EntrantId>;
}

impl<F> ManualDecision for F
where
    F: FnMut(EntrantId, EntrantId) -> Option<EntrantId>,
{
    fn decide(&mut self, first: EntrantId, second: EntrantId) -> Option<EntrantId> {
        self(first, second)
    }
}

/// Always defers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecision;

impl ManualDecision for NoDecision {
    fn decide(&mut self, _first: EntrantId, _second: EntrantId) -> Option<EntrantId> {
        None
    }
}

/// Answers from decisions taken earlier, e.g. collected by a front end
/// after a ranking came back awaiting a decision.
///
/// Each decision belongs to one pair, so an entrant can win one tie and
/// lose another.
#[derive(Debug, Clone, Default)]
pub struct RecordedDecisions {
    winners: HashMap<(EntrantId, EntrantId), EntrantId>,
}

impl RecordedDecisions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `winner` as the winner of the tie between `first` and
    /// `second`, replacing any earlier decision for that pair.
    pub fn record(&mut self, first: EntrantId, second: EntrantId, winner: EntrantId) {
        self.winners.insert(pair_key(first, second), winner);
    }
}

impl ManualDecision for RecordedDecisions {
    fn decide(&mut self, first: EntrantId, second: EntrantId) -> Option<EntrantId> {
        self.winners.get(&pair_key(first, second)).copied()
    }
}

fn pair_key(a: EntrantId, b: EntrantId) -> (EntrantId, EntrantId) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_closure_decides() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut always_second = |_: EntrantId, second: EntrantId| Some(second);
        assert_eq!(always_second.decide(a, b), Some(b));
        assert_eq!(NoDecision.decide(a, b), None);
    }

    #[test]
    fn test_recorded_decisions() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut recorded = RecordedDecisions::new();
        assert_eq!(recorded.decide(a, b), None);
        recorded.record(a, b, b);
        assert_eq!(recorded.decide(a, b), Some(b));
        assert_eq!(recorded.decide(b, a), Some(b));
        recorded.record(b, a, a);
        assert_eq!(recorded.decide(a, b), Some(a));
    }

    #[test]
    fn test_decisions_are_per_pair() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let mut recorded = RecordedDecisions::new();
        recorded.record(a, b, a);
        recorded.record(b, c, b);

        // b won one tie and lost the other.
        assert_eq!(recorded.decide(a, b), Some(a));
        assert_eq!(recorded.decide(c, b), Some(b));
        assert_eq!(recorded.decide(a, c), None);
    }
}
