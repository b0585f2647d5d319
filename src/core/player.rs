//! Player identification and per-player score history.
//!
//! ## PlayerId
//!
//! Opaque, stable identifier allocated once at registration.
//!
//! ## Player
//!
//! A registered player: display name, color and the list of per-round
//! scores. The running total is always derived from the score list.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::Color;

/// Opaque player identifier.
///
/// Ids are unique for the lifetime of a game and survive save/load.
/// They carry no ordering meaning; registration order lives in the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a player ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player#{}", self.0)
    }
}

/// A registered player.
///
/// Fields are private: a player is never renamed and its total can only
/// change by appending a round score through the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    scores: Vector<i64>,
    color: Color,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String, color: Color) -> Self {
        Self {
            id,
            name,
            scores: Vector::new(),
            color,
        }
    }

    pub(crate) fn with_scores(id: PlayerId, name: String, color: Color, scores: Vector<i64>) -> Self {
        Self {
            id,
            name,
            scores,
            color,
        }
    }

    /// Player identifier.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Trimmed display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display color assigned at registration.
    #[must_use]
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Per-round scores, oldest first.
    #[must_use]
    pub fn scores(&self) -> &Vector<i64> {
        &self.scores
    }

    /// Number of rounds recorded for this player.
    #[must_use]
    pub fn rounds_played(&self) -> usize {
        self.scores.len()
    }

    /// Running total: the sum of all round scores.
    ///
    /// Scores are bounded by [`SCORE_LIMIT`](crate::core::SCORE_LIMIT) on
    /// the way in, so the sum cannot overflow.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.scores.iter().sum()
    }

    pub(crate) fn push_score(&mut self, score: i64) {
        self.scores.push_back(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(PlayerId::new(7), "Ann".to_string(), Color::new("#3b82f6"))
    }

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Player#42");
    }

    #[test]
    fn test_new_player_is_empty() {
        let p = player();
        assert_eq!(p.id(), PlayerId::new(7));
        assert_eq!(p.name(), "Ann");
        assert_eq!(p.total(), 0);
        assert_eq!(p.rounds_played(), 0);
    }

    #[test]
    fn test_total_tracks_scores() {
        let mut p = player();
        p.push_score(30);
        p.push_score(-5);
        p.push_score(0);

        assert_eq!(p.rounds_played(), 3);
        assert_eq!(p.total(), 25);
        assert_eq!(p.scores().iter().copied().collect::<Vec<_>>(), vec![30, -5, 0]);
    }

    #[test]
    fn test_total_at_score_limit() {
        let mut p = player();
        p.push_score(crate::core::SCORE_LIMIT);
        p.push_score(crate::core::SCORE_LIMIT);
        p.push_score(-crate::core::SCORE_LIMIT);
        assert_eq!(p.total(), crate::core::SCORE_LIMIT);
    }

    #[test]
    fn test_player_id_serialization() {
        let json = serde_json::to_string(&PlayerId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerId::new(9));
    }
}
