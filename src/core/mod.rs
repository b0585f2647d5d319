//! Core scoring types: players, configuration, ids, phase, ledger, snapshots.
//!
//! Everything here is free of presentation and storage concerns. The
//! controller drives these types; the persistence layer only sees
//! `Snapshot`.

pub mod player;
pub mod rng;
pub mod config;
pub mod phase;
pub mod ledger;
pub mod snapshot;

pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use config::{Color, Palette, PaletteError, GameConfig, DEFAULT_GOAL_SCORE, DEFAULT_PALETTE, DEFAULT_VISUAL_MAX_SCORE, STORAGE_KEY};
pub use phase::Phase;
pub use ledger::{parse_score, Ranking, RoundScores, ScoreLedger, SCORE_LIMIT};
pub use snapshot::{PlayerRecord, Snapshot, SnapshotError};
