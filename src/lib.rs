//! # scorekeeper
//!
//! Offline, round-by-round scorekeeping for multiplayer tabletop games.
//!
//! ## Design Principles
//!
//! 1. **Totals are derived**: a player's total is always the sum of its
//!    round scores. No code path writes a total.
//!
//! 2. **Rounds are atomic**: a commit appends exactly one score to every
//!    player, so score lists never drift apart.
//!
//! 3. **No error channel in the core**: invalid input is either ignored
//!    (empty names, starting with no players) or coerced (malformed scores
//!    count as 0).
//!
//! ## Architecture
//!
//! - **Session-owned controller**: a `GameController` is constructed
//!   explicitly and handed to the presentation layer. There is no global.
//!
//! - **Snapshots at the storage seam**: storage only ever sees `Snapshot`.
//!   Loading repairs bad data instead of failing, and a missing save is
//!   simply a new game.
//!
//! ## Modules
//!
//! - `core`: players, ids, configuration, phase, ledger, snapshots
//! - `entry`: staged per-round score entry
//! - `controller`: the phase state machine and commands
//! - `persistence`: snapshot stores
//! - `view`: read-only projection for renderers
//!
//! ## Example
//!
//! ```
//! use scorekeeper::{GameConfig, GameController, MemoryStore, Phase};
//!
//! let mut game = GameController::new(GameConfig::new().with_id_seed(7), MemoryStore::new());
//! let ann = game.add_player("Ann").unwrap();
//! game.add_player("Bo");
//! assert!(game.start_game());
//!
//! game.open_round_entry();
//! game.digit(3);
//! game.digit(0);
//! let snapshot = game.commit().unwrap();
//!
//! assert_eq!(snapshot.round, 2);
//! assert_eq!(game.phase(), Phase::Active);
//! assert_eq!(game.ledger().ranking()[0].id(), ann);
//! ```

pub mod core;
pub mod entry;
pub mod controller;
pub mod persistence;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    Color, Palette, PaletteError, GameConfig, GameRng,
    Player, PlayerId, Phase,
    ScoreLedger, Ranking, RoundScores, parse_score, SCORE_LIMIT,
    Snapshot, PlayerRecord, SnapshotError,
};

pub use crate::entry::{StagedEntry, StagedValue};

pub use crate::controller::{Command, GameController, Outcome};

pub use crate::persistence::{JsonFileStore, MemoryStore, SnapshotStore, StoreError};

pub use crate::view::{EntryRow, EntryView, GameView, PlayerView, RankedEntry};
