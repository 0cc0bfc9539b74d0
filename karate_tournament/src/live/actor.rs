//! Match actor: one task per live match.

use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Instant, MissedTickBehavior, interval_at},
};

use super::{
    config::LiveMatchConfig,
    errors::{LiveMatchError, LiveMatchResult},
    messages::{MatchCommand, MatchResponse},
};
use crate::bout::{Corner, Match, MatchId, MatchResult};

/// Match actor handle for sending commands
#[derive(Clone)]
pub struct MatchHandle {
    sender: mpsc::Sender<MatchCommand>,
    match_id: MatchId,
}

impl MatchHandle {
    pub fn new(sender: mpsc::Sender<MatchCommand>, match_id: MatchId) -> Self {
        Self { sender, match_id }
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    /// Send a command to the match
    pub async fn send(&self, command: MatchCommand) -> LiveMatchResult<()> {
        self.sender
            .send(command)
            .await
            .map_err(|_| LiveMatchError::Closed(self.match_id))
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> MatchCommand,
    ) -> LiveMatchResult<T> {
        let (tx, rx) = oneshot::channel();
        self.send(command(tx)).await?;
        rx.await.map_err(|_| LiveMatchError::Closed(self.match_id))
    }

    pub async fn add_point(&self, corner: Corner, delta: i32) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::AddPoint {
            corner,
            delta,
            response,
        })
        .await
    }

    pub async fn adjust_penalty(
        &self,
        corner: Corner,
        delta: i32,
    ) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::AdjustPenalty {
            corner,
            delta,
            response,
        })
        .await
    }

    pub async fn withdraw_advantage(&self) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::WithdrawAdvantage { response })
            .await
    }

    pub async fn start_clock(&self) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::StartClock { response })
            .await
    }

    pub async fn stop_clock(&self) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::StopClock { response })
            .await
    }

    pub async fn set_clock(&self, remaining: Duration) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::SetClock {
            remaining,
            response,
        })
        .await
    }

    pub async fn reset_clock(&self) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::ResetClock { response })
            .await
    }

    pub async fn tick(&self, elapsed: Duration) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::Tick { elapsed, response })
            .await
    }

    pub async fn finish(&self) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::Finish { response })
            .await
    }

    pub async fn start_overtime(&self) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::StartOvertime { response })
            .await
    }

    pub async fn decide(&self, corner: Corner) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::Decide { corner, response })
            .await
    }

    pub async fn disqualify(&self, corner: Corner) -> LiveMatchResult<MatchResponse> {
        self.request(|response| MatchCommand::Disqualify { corner, response })
            .await
    }

    pub async fn state(&self) -> LiveMatchResult<Match> {
        self.request(|response| MatchCommand::GetState { response })
            .await
    }

    /// Stop the actor; returns the match as it ended
    pub async fn close(&self) -> LiveMatchResult<Match> {
        self.request(|response| MatchCommand::Close { response })
            .await
    }
}

/// Actor owning a single live match
///
/// Every mutation arrives through the inbox, so commands from several
/// scoreboards are applied one at a time in arrival order. A periodic tick
/// runs the clock.
pub struct MatchActor {
    state: Match,

    config: LiveMatchConfig,

    inbox: mpsc::Receiver<MatchCommand>,

    /// When the clock was last advanced; ticks subtract the real time since.
    last_tick: Instant,

    is_closed: bool,
}

impl MatchActor {
    /// Create a new match actor
    ///
    /// # Returns
    ///
    /// * `(MatchActor, MatchHandle)` - Actor and handle for sending commands
    pub fn new(state: Match, config: LiveMatchConfig) -> (Self, MatchHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity);
        let handle = MatchHandle::new(sender, state.id);
        let actor = Self {
            state,
            config,
            inbox,
            last_tick: Instant::now(),
            is_closed: false,
        };
        (actor, handle)
    }

    /// Run the match actor event loop
    pub async fn run(mut self) {
        log::info!("Live match {} starting", self.state.id);

        let period = self.config.tick_interval();
        self.last_tick = Instant::now();
        let mut ticker = interval_at(self.last_tick + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = self.inbox.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        // Every handle dropped.
                        None => break,
                    }

                    if self.is_closed {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(self.last_tick);
                    self.last_tick = now;
                    if let Err(e) = self.state.tick(elapsed) {
                        log::warn!("Live match {}: tick failed: {e}", self.state.id);
                    }
                }
            }
        }

        log::info!("Live match {} closed", self.state.id);
    }

    fn handle_command(&mut self, command: MatchCommand) {
        match command {
            MatchCommand::AddPoint {
                corner,
                delta,
                response,
            } => {
                let result = self.state.add_point(corner, delta);
                let _ = response.send(respond(result, MatchResponse::Score));
            }

            MatchCommand::AdjustPenalty {
                corner,
                delta,
                response,
            } => {
                let result = self.state.adjust_penalty(corner, delta);
                let _ = response.send(respond(result, MatchResponse::Score));
            }

            MatchCommand::WithdrawAdvantage { response } => {
                let result = self.state.withdraw_advantage();
                let _ = response.send(respond(result, MatchResponse::Advantage));
            }

            MatchCommand::StartClock { response } => {
                let was_running = self.state.timed_state().is_some_and(|t| t.running);
                let result = self.state.start_clock();
                if result.is_ok() && !was_running {
                    self.last_tick = Instant::now();
                }
                let _ = response.send(respond(result, |()| MatchResponse::Success));
            }

            MatchCommand::StopClock { response } => {
                let result = self.state.stop_clock();
                let _ = response.send(respond(result, |()| MatchResponse::Success));
            }

            MatchCommand::SetClock {
                remaining,
                response,
            } => {
                let result = self.state.set_clock(remaining);
                let _ = response.send(respond(result, |()| MatchResponse::Success));
            }

            MatchCommand::ResetClock { response } => {
                let result = self.state.reset_clock();
                let _ = response.send(respond(result, |()| MatchResponse::Success));
            }

            MatchCommand::Tick { elapsed, response } => {
                let result = self.state.tick(elapsed);
                let _ = response.send(respond(result, MatchResponse::Clock));
            }

            MatchCommand::Finish { response } => {
                let result = self.state.finish();
                let _ = response.send(respond(result, |winner| MatchResponse::Finished {
                    winner,
                }));
            }

            MatchCommand::StartOvertime { response } => {
                let result = self.state.start_overtime();
                let _ = response.send(respond(result, MatchResponse::Clock));
            }

            MatchCommand::Decide { corner, response } => {
                let result = self.state.decide(corner);
                let _ = response.send(respond(result, |winner| MatchResponse::Finished {
                    winner,
                }));
            }

            MatchCommand::Disqualify { corner, response } => {
                let result = self.state.disqualify(corner);
                let _ = response.send(respond(result, |winner| MatchResponse::Finished {
                    winner,
                }));
            }

            MatchCommand::GetState { response } => {
                let _ = response.send(self.state.clone());
            }

            MatchCommand::Close { response } => {
                if let Err(e) = self.state.stop_clock() {
                    log::debug!("Live match {}: {e}", self.state.id);
                }
                self.is_closed = true;
                let _ = response.send(self.state.clone());
            }
        }
    }
}

fn respond<T>(result: MatchResult<T>, on_success: impl FnOnce(T) -> MatchResponse) -> MatchResponse {
    match result {
        Ok(value) => on_success(value),
        Err(e) => MatchResponse::Rejected(e),
    }
}
