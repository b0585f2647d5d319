//! Storage trait and in-memory implementation.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{Snapshot, SnapshotError};

/// Storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot I/O failed for {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] SnapshotError),
}

/// Where snapshots live between sessions.
///
/// `load` returning `Ok(None)` means there is no prior game.
pub trait SnapshotStore {
    /// Read the stored snapshot, if any.
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Forget the stored snapshot.
    fn clear(&mut self) -> Result<(), StoreError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-memory store.
///
/// Holds the bincode encoding rather than the value so every save and load
/// goes through the same serialization boundary as a real store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: &Snapshot) -> Result<Self, StoreError> {
        Ok(Self {
            bytes: Some(snapshot.to_bytes()?),
            saves: 0,
        })
    }

    /// Number of successful saves.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// True if a snapshot is stored.
    #[must_use]
    pub fn has_snapshot(&self) -> bool {
        self.bytes.is_some()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
        match &self.bytes {
            Some(bytes) => Ok(Some(Snapshot::from_bytes(bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.bytes = Some(snapshot.to_bytes()?);
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.bytes = None;
        Ok(())
    }
}
