//! Snapshot repositories.
//!
//! The tournament itself never touches storage; hosts save and load
//! [`TournamentSnapshot`]s through a [`SnapshotRepository`].

use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::sync::RwLock;

use super::errors::{PersistenceError, PersistenceResult};
use crate::tournament::TournamentSnapshot;

/// Trait for snapshot storage
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Store a snapshot, replacing the previous one
    async fn save(&self, snapshot: &TournamentSnapshot) -> PersistenceResult<()>;

    /// Latest snapshot, or `None` when nothing was saved yet
    async fn load(&self) -> PersistenceResult<Option<TournamentSnapshot>>;
}

/// Pretty-printed JSON file
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl SnapshotRepository for JsonFileRepository {
    async fn save(&self, snapshot: &TournamentSnapshot) -> PersistenceResult<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))?;

        log::debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }

    async fn load(&self) -> PersistenceResult<Option<TournamentSnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let snapshot = serde_json::from_slice(&bytes)?;
        log::debug!("Loaded snapshot from {}", self.path.display());
        Ok(Some(snapshot))
    }
}

/// Keeps the latest snapshot in memory
#[derive(Default)]
pub struct InMemoryRepository {
    snapshot: RwLock<Option<TournamentSnapshot>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotRepository for InMemoryRepository {
    async fn save(&self, snapshot: &TournamentSnapshot) -> PersistenceResult<()> {
        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> PersistenceResult<Option<TournamentSnapshot>> {
        Ok(self.snapshot.read().await.clone())
    }
}
