//! Snapshot storage.
//!
//! The controller loads once at startup and saves after every committed
//! mutation. Stores report failures through `StoreError`; the controller
//! logs them and keeps playing.
//!
//! - `MemoryStore`: keeps the encoded snapshot in memory
//! - `JsonFileStore`: one JSON file on disk

pub mod store;
pub mod file;

pub use store::{MemoryStore, SnapshotStore, StoreError};
pub use file::JsonFileStore;
