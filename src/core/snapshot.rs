//! Serializable game snapshot.
//!
//! A `Snapshot` is the full externally visible state: players with their
//! scores and totals, the round counter and the phase. It is what the
//! persistence layer stores and what a fresh session is rebuilt from.
//!
//! ## Loading
//!
//! Stored data is treated as untrusted. [`Snapshot::into_ledger`] repairs
//! rather than rejects:
//! - totals are recomputed from the score lists
//! - missing colors are re-derived from registration order
//! - ids that are not whole numbers get fresh ids, in order
//! - repeated ids keep only their first player
//! - scores beyond `SCORE_LIMIT` count as 0
//! - short score lists are padded with zeros
//! - the round counter is re-derived from the score lists
//!
//! A well-formed snapshot survives `into_ledger` followed by `from_ledger`
//! unchanged.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use super::config::{Color, Palette};
use super::ledger::{in_range, ScoreLedger, SCORE_LIMIT};
use super::phase::Phase;
use super::player::{Player, PlayerId};
use super::rng::GameRng;

/// Snapshot encode/decode failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid snapshot bytes: {0}")]
    Binary(#[from] bincode::Error),
}

/// Placeholder for a stored id that cannot be kept; replaced on load.
const UNASSIGNED: PlayerId = PlayerId::new(0);

/// Largest integer a JSON double represents exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Whole(u64),
    Fractional(f64),
}

/// Decode an id written either by this crate or by older saves that used
/// millisecond timestamps with a random fraction. Anything that is not a
/// positive whole number decodes as `UNASSIGNED`.
fn stored_id<'de, D>(deserializer: D) -> Result<PlayerId, D::Error>
where
    D: Deserializer<'de>,
{
    if !deserializer.is_human_readable() {
        return u64::deserialize(deserializer).map(PlayerId::new);
    }
    let id = match StoredId::deserialize(deserializer)? {
        StoredId::Whole(raw) => PlayerId::new(raw),
        StoredId::Fractional(raw) if raw.fract() == 0.0 && raw >= 1.0 && raw < MAX_EXACT_FLOAT => {
            PlayerId::new(raw as u64)
        }
        StoredId::Fractional(_) => UNASSIGNED,
    };
    Ok(id)
}

/// One player as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(deserialize_with = "stored_id")]
    pub id: PlayerId,
    pub name: String,
    pub scores: Vec<i64>,

    /// Stored for consumers; ignored on load.
    #[serde(default)]
    pub total: i64,

    /// May be absent in older saves.
    #[serde(default)]
    pub color: Option<Color>,
}

impl PlayerRecord {
    fn from_player(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            scores: player.scores().iter().copied().collect(),
            total: player.total(),
            color: Some(player.color().clone()),
        }
    }
}

fn first_round() -> u32 {
    1
}

/// Complete serializable game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<PlayerRecord>,

    #[serde(default = "first_round")]
    pub round: u32,

    #[serde(default)]
    pub status: Phase,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            round: first_round(),
            status: Phase::Setup,
        }
    }
}

impl Snapshot {
    /// Capture a ledger and phase.
    #[must_use]
    pub fn from_ledger(ledger: &ScoreLedger, phase: Phase) -> Self {
        Self {
            players: ledger.players().iter().map(PlayerRecord::from_player).collect(),
            round: ledger.round(),
            status: phase,
        }
    }

    /// Rebuild a ledger and phase, repairing inconsistent data.
    ///
    /// `ids` allocates replacement ids for stored ids that could not be
    /// kept, then ids for players registered after the reload.
    #[must_use]
    pub fn into_ledger(self, palette: &Palette, mut ids: GameRng) -> (ScoreLedger, Phase) {
        let kept: FxHashSet<PlayerId> = self
            .players
            .iter()
            .map(|r| r.id)
            .filter(|id| *id != UNASSIGNED)
            .collect();

        let mut seen = FxHashSet::default();
        let mut records = Vec::with_capacity(self.players.len());
        for mut record in self.players {
            if record.id == UNASSIGNED {
                let fresh = loop {
                    let id = ids.next_id();
                    if !kept.contains(&id) && !seen.contains(&id) {
                        break id;
                    }
                };
                warn!(name = %record.name, id = %fresh, "assigning fresh id to stored player");
                record.id = fresh;
            }
            if !seen.insert(record.id) {
                warn!(id = %record.id, "dropping player with repeated id");
                continue;
            }
            let name = record.name.trim();
            if name.is_empty() {
                warn!(id = %record.id, "dropping player with empty name");
                continue;
            }
            records.push(PlayerRecord {
                name: name.to_string(),
                ..record
            });
        }

        let played = records.iter().map(|r| r.scores.len()).max().unwrap_or(0);

        let players: Vector<Player> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let color = record.color.unwrap_or_else(|| palette.color_for(index));
                let mut scores: Vector<i64> = record
                    .scores
                    .into_iter()
                    .map(|score| {
                        if in_range(score) {
                            score
                        } else {
                            warn!(id = %record.id, score, limit = SCORE_LIMIT, "zeroing out-of-range stored score");
                            0
                        }
                    })
                    .collect();
                if scores.len() < played {
                    warn!(id = %record.id, missing = played - scores.len(), "padding short score list");
                    while scores.len() < played {
                        scores.push_back(0);
                    }
                }
                Player::with_scores(record.id, record.name, color, scores)
            })
            .collect();

        let ledger = ScoreLedger::from_players(players, ids);
        if ledger.round() != self.round {
            warn!(stored = self.round, derived = ledger.round(), "round counter re-derived from scores");
        }

        let phase = if ledger.is_empty() && self.status != Phase::Setup {
            warn!(status = %self.status, "no players in stored game, starting at Setup");
            Phase::Setup
        } else {
            self.status
        };

        (ledger, phase)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
