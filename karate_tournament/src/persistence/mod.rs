//! Snapshot storage.

pub mod errors;
pub mod repository;

pub use errors::{PersistenceError, PersistenceResult};
pub use repository::{InMemoryRepository, JsonFileRepository, SnapshotRepository};
