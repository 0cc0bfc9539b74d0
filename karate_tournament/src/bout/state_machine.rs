//! Match transitions.
//!
//! Every operation validates first and mutates second, so an `Err` leaves the
//! match exactly as it was.

use log::{debug, warn};
use std::time::Duration;

use super::{
    errors::{MatchError, MatchResult},
    models::{Corner, DecidedBy, Match, MatchKind, MatchPhase, TimedState},
};
use crate::entities::EntrantId;

impl Match {
    fn ensure_open(&self) -> MatchResult<()> {
        if self.finished {
            return Err(MatchError::AlreadyFinished);
        }
        Ok(())
    }

    fn ensure_ready(&self) -> MatchResult<()> {
        match self.phase() {
            MatchPhase::Finished => Err(MatchError::AlreadyFinished),
            MatchPhase::Pending => Err(MatchError::NotReady),
            MatchPhase::Ready | MatchPhase::Overtime => Ok(()),
        }
    }

    fn timed_mut(&mut self) -> MatchResult<&mut TimedState> {
        match &mut self.kind {
            MatchKind::Timed(timed) => Ok(timed),
            MatchKind::Standard => Err(MatchError::NotTimed),
        }
    }

    fn timed_ref(&self) -> MatchResult<&TimedState> {
        self.timed_state().ok_or(MatchError::NotTimed)
    }

    /// Adjust a corner's score by `delta`, clamped at zero.
    ///
    /// On a timed match with the advantage rule on, the first corner to move
    /// off a 0-0 score takes the advantage for the current segment.
    pub fn add_point(&mut self, corner: Corner, delta: i32) -> MatchResult<u32> {
        self.ensure_ready()?;

        let was_scoreless = self.aka_score == 0 && self.shiro_score == 0;
        let score = self.score_mut(corner);
        *score = apply_delta(*score, delta);
        let new_score = *score;

        if let MatchKind::Timed(timed) = &mut self.kind {
            if timed.rules.advantage_rule
                && was_scoreless
                && new_score > 0
                && timed.advantage.is_none()
                && !timed.advantage_awarded
            {
                timed.advantage = Some(corner);
                timed.advantage_awarded = true;
                debug!("Match {}: advantage to {corner}", self.id);
            }
        }

        Ok(new_score)
    }

    /// Take the advantage away. It stays vacant until the next overtime.
    pub fn withdraw_advantage(&mut self) -> MatchResult<Option<Corner>> {
        self.ensure_open()?;
        let timed = self.timed_mut()?;
        let previous = timed.advantage.take();
        timed.advantage_awarded = true;
        Ok(previous)
    }

    /// Adjust a corner's penalty counter by `delta`, clamped at zero.
    pub fn adjust_penalty(&mut self, corner: Corner, delta: i32) -> MatchResult<u32> {
        self.ensure_open()?;
        let timed = self.timed_mut()?;
        let penalty = timed.penalty_mut(corner);
        *penalty = apply_delta(*penalty, delta);
        Ok(*penalty)
    }

    /// Overwrite the remaining time. Stops the clock.
    pub fn set_clock(&mut self, remaining: Duration) -> MatchResult<()> {
        self.ensure_open()?;
        let timed = self.timed_mut()?;
        timed.remaining = remaining;
        timed.running = false;
        Ok(())
    }

    pub fn start_clock(&mut self) -> MatchResult<()> {
        self.ensure_ready()?;
        if self.timed_ref()?.remaining.is_zero() {
            return Err(MatchError::ClockExpired);
        }
        self.timed_mut()?.running = true;
        debug!("Match {}: clock started", self.id);
        Ok(())
    }

    /// Stop the clock. Stopping a stopped clock, or the clock of a finished
    /// match, is a no-op.
    pub fn stop_clock(&mut self) -> MatchResult<()> {
        self.timed_mut()?.running = false;
        Ok(())
    }

    /// Restore the full length of the current segment and stop the clock.
    pub fn reset_clock(&mut self) -> MatchResult<()> {
        self.ensure_open()?;
        let timed = self.timed_mut()?;
        timed.remaining = if timed.overtime {
            timed.rules.overtime()
        } else {
            timed.rules.duration()
        };
        timed.running = false;
        Ok(())
    }

    /// Advance the clock by `elapsed`. Returns the remaining time.
    pub fn tick(&mut self, elapsed: Duration) -> MatchResult<Duration> {
        let id = self.id;
        let timed = self.timed_mut()?;
        if !timed.running {
            return Ok(timed.remaining);
        }
        timed.remaining = timed.remaining.saturating_sub(elapsed);
        if timed.remaining.is_zero() {
            timed.running = false;
            debug!("Match {id}: time up");
        }
        Ok(timed.remaining)
    }

    /// Close the match on the scoreboard.
    ///
    /// The higher score wins; a tie goes to the advantage holder when the
    /// advantage rule is on. Otherwise the match stays open with
    /// [`MatchError::Tied`].
    pub fn finish(&mut self) -> MatchResult<EntrantId> {
        self.ensure_ready()?;

        let (corner, decided_by) = if self.aka_score > self.shiro_score {
            (Corner::Aka, DecidedBy::Points)
        } else if self.shiro_score > self.aka_score {
            (Corner::Shiro, DecidedBy::Points)
        } else {
            match self.timed_state() {
                Some(timed) if timed.rules.advantage_rule => match timed.advantage {
                    Some(holder) => (holder, DecidedBy::Advantage),
                    None => return Err(MatchError::Tied),
                },
                _ => return Err(MatchError::Tied),
            }
        };

        self.complete(corner, decided_by)
    }

    /// Begin an overtime segment after regulation (or a previous overtime)
    /// ended level.
    pub fn start_overtime(&mut self) -> MatchResult<Duration> {
        self.ensure_ready()?;
        if self.aka_score != self.shiro_score {
            return Err(MatchError::NotTied);
        }
        let timed = self.timed_ref()?;
        if !timed.remaining.is_zero() {
            return Err(MatchError::ClockNotExpired {
                remaining_ms: timed.remaining.as_millis(),
            });
        }

        let id = self.id;
        let timed = self.timed_mut()?;
        timed.advantage = None;
        timed.advantage_awarded = false;
        timed.remaining += timed.rules.overtime();
        timed.running = false;
        timed.overtime = true;
        timed.overtime_count += 1;
        debug!("Match {id}: overtime #{}", timed.overtime_count);
        Ok(timed.remaining)
    }

    /// Finish with an externally supplied winner.
    pub fn decide(&mut self, winner: Corner) -> MatchResult<EntrantId> {
        self.ensure_ready()?;
        self.complete(winner, DecidedBy::Decision)
    }

    /// Disqualify `corner`; the opponent wins.
    pub fn disqualify(&mut self, corner: Corner) -> MatchResult<EntrantId> {
        self.ensure_ready()?;
        self.disqualification = true;
        warn!("Match {}: {corner} disqualified", self.id);
        self.complete(corner.opponent(), DecidedBy::Disqualification)
    }

    /// Finish a match that has exactly one contender.
    pub(crate) fn resolve_bye(&mut self) -> MatchResult<EntrantId> {
        self.ensure_open()?;
        match (self.aka, self.shiro) {
            (Some(_), None) => self.complete(Corner::Aka, DecidedBy::Bye),
            (None, Some(_)) => self.complete(Corner::Shiro, DecidedBy::Bye),
            _ => Err(MatchError::NotReady),
        }
    }

    fn complete(&mut self, corner: Corner, decided_by: DecidedBy) -> MatchResult<EntrantId> {
        let winner = self.contender(corner).ok_or(MatchError::NotReady)?;
        self.winner = Some(winner);
        self.finished = true;
        self.decided_by = Some(decided_by);
        if let MatchKind::Timed(timed) = &mut self.kind {
            timed.running = false;
        }
        debug!("Match {} won by {winner} ({decided_by:?})", self.id);
        Ok(winner)
    }
}

fn apply_delta(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
