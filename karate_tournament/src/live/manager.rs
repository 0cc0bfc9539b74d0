//! Live match manager for spawning and closing match actors.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::{
    actor::{MatchActor, MatchHandle},
    config::LiveMatchConfig,
    errors::{LiveMatchError, LiveMatchResult},
};
use crate::bout::{Match, MatchId};

/// Keeps one actor per live match
pub struct LiveMatchManager {
    config: LiveMatchConfig,

    /// Active match handles
    matches: Arc<RwLock<HashMap<MatchId, MatchHandle>>>,
}

impl LiveMatchManager {
    pub fn new(config: LiveMatchConfig) -> LiveMatchResult<Self> {
        config.validate().map_err(LiveMatchError::InvalidConfig)?;
        Ok(Self {
            config,
            matches: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Spawn an actor for a timed match
    ///
    /// # Arguments
    ///
    /// * `state` - The match to run; it must carry a clock
    ///
    /// # Returns
    ///
    /// * `MatchHandle` - Handle for sending commands to the match
    pub async fn open(&self, state: Match) -> LiveMatchResult<MatchHandle> {
        let match_id = state.id;
        if !state.is_timed() {
            return Err(LiveMatchError::NotTimed(match_id));
        }

        let mut matches = self.matches.write().await;
        if matches.contains_key(&match_id) {
            return Err(LiveMatchError::AlreadyLive(match_id));
        }

        let (actor, handle) = MatchActor::new(state, self.config.clone());
        tokio::spawn(actor.run());
        matches.insert(match_id, handle.clone());
        drop(matches);

        log::info!("Opened live match {match_id}");
        Ok(handle)
    }

    pub async fn handle(&self, match_id: MatchId) -> Option<MatchHandle> {
        self.matches.read().await.get(&match_id).cloned()
    }

    /// Stop a match actor and return the final state for write-back
    pub async fn close(&self, match_id: MatchId) -> LiveMatchResult<Match> {
        let handle = self
            .matches
            .write()
            .await
            .remove(&match_id)
            .ok_or(LiveMatchError::NotFound(match_id))?;

        let state = handle.close().await?;
        log::info!("Closed live match {match_id}");
        Ok(state)
    }

    /// Close every live match
    pub async fn close_all(&self) -> Vec<Match> {
        let handles: Vec<MatchHandle> = self.matches.write().await.drain().map(|(_, h)| h).collect();

        let mut closed = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.close().await {
                Ok(state) => closed.push(state),
                Err(e) => log::warn!("Failed to close live match: {e}"),
            }
        }
        closed
    }

    pub async fn live_count(&self) -> usize {
        self.matches.read().await.len()
    }
}
