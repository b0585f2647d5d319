//! Score ledger: the authoritative record of players, scores and rounds.
//!
//! ## Invariants
//!
//! - Player ids are unique.
//! - Every player's score list has the same length, `round - 1`.
//! - A total is always the sum of its score list (see [`Player::total`]).
//! - Colors follow registration order through the palette.
//!
//! The ledger has no phase of its own; the controller decides when a
//! mutation is allowed.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::config::Palette;
use super::player::{Player, PlayerId};
use super::rng::GameRng;

/// Scores of one committed round, in registration order.
pub type RoundScores = SmallVec<[i64; 8]>;

/// Players ordered by standing.
pub type Ranking<'a> = SmallVec<[&'a Player; 8]>;

/// Largest magnitude a single round score may have.
///
/// With at most `u32::MAX` rounds, a sum of scores within this bound always
/// fits in an `i64`, so a total is exactly the sum of its score list.
pub const SCORE_LIMIT: i64 = 1_000_000_000;

/// Parse a staged textual score.
///
/// Empty, malformed or out-of-range text counts as 0. Surrounding
/// whitespace and a leading sign are accepted. The whole trimmed text must
/// be a number, unlike prefix parsing: `"12abc"` scores 0, not 12.
#[must_use]
pub fn parse_score(text: &str) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    match text.parse::<i64>() {
        Ok(score) if in_range(score) => score,
        Ok(score) => {
            debug!(score, limit = SCORE_LIMIT, "coercing out-of-range score to 0");
            0
        }
        Err(err) => {
            debug!(input = text, %err, "coercing malformed score to 0");
            0
        }
    }
}

/// True iff `score` is within `SCORE_LIMIT` in either direction.
#[must_use]
pub(crate) fn in_range(score: i64) -> bool {
    (-SCORE_LIMIT..=SCORE_LIMIT).contains(&score)
}

/// Players, their per-round scores and the round counter.
#[derive(Clone, Debug)]
pub struct ScoreLedger {
    players: Vector<Player>,
    round: u32,
    ids: GameRng,
}

impl ScoreLedger {
    /// Create an empty ledger at round 1.
    #[must_use]
    pub fn new(ids: GameRng) -> Self {
        Self {
            players: Vector::new(),
            round: 1,
            ids,
        }
    }

    /// Rebuild a ledger from already-validated players.
    ///
    /// Score lists must have equal length; `round` becomes that length + 1.
    pub(crate) fn from_players(players: Vector<Player>, ids: GameRng) -> Self {
        let played = players.front().map_or(0, Player::rounds_played);
        debug_assert!(players.iter().all(|p| p.rounds_played() == played));
        Self {
            players,
            round: played as u32 + 1,
            ids,
        }
    }

    // === Readers ===

    /// Players in registration order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Registration index of a player.
    #[must_use]
    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    /// Current round (starts at 1).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Number of committed rounds.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.round - 1
    }

    /// Number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when no player is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player ids in registration order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(Player::id)
    }

    // === Mutation ===

    /// Register a player.
    ///
    /// The name is trimmed; an empty name is ignored and returns `None`.
    /// Duplicate names are allowed. If rounds were already committed the
    /// new player gets a 0 for each of them so score lists stay aligned.
    pub fn add_player(&mut self, name: &str, palette: &Palette) -> Option<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring player with empty name");
            return None;
        }

        let id = self.allocate_id();
        let color = palette.color_for(self.players.len());
        let mut player = Player::new(id, name.to_string(), color);
        for _ in 0..self.rounds_played() {
            player.push_score(0);
        }

        debug!(%id, name, color = %player.color(), "registered player");
        self.players.push_back(player);
        Some(id)
    }

    /// Commit one round for every player.
    ///
    /// `scores` maps player ids to staged text. Players missing from it, or
    /// holding empty or malformed text, score 0. Ids not in the ledger are
    /// ignored; for repeated ids the last value wins.
    pub fn record_round<'a, I>(&mut self, scores: I) -> RoundScores
    where
        I: IntoIterator<Item = (PlayerId, &'a str)>,
    {
        let staged: FxHashMap<PlayerId, &str> = scores.into_iter().collect();

        let mut committed = RoundScores::new();
        for player in self.players.iter_mut() {
            let score = staged.get(&player.id()).map_or(0, |text| parse_score(text));
            player.push_score(score);
            committed.push(score);
        }
        self.round += 1;

        trace!(round = self.round - 1, scores = ?committed, "recorded round");
        committed
    }

    /// True iff at least one total is >= `goal`.
    #[must_use]
    pub fn threshold_reached(&self, goal: i64) -> bool {
        self.players.iter().any(|p| p.total() >= goal)
    }

    /// Players by descending total. Ties keep registration order.
    #[must_use]
    pub fn ranking(&self) -> Ranking<'_> {
        let mut ranked: Ranking<'_> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.total().cmp(&a.total()));
        ranked
    }

    /// Players sharing the highest total. Empty for an empty ledger.
    #[must_use]
    pub fn leaders(&self) -> Ranking<'_> {
        let Some(best) = self.players.iter().map(Player::total).max() else {
            return Ranking::new();
        };
        self.players.iter().filter(|p| p.total() == best).collect()
    }

    /// Drop all players and return to round 1.
    pub fn reset(&mut self) {
        self.players.clear();
        self.round = 1;
    }

    fn allocate_id(&mut self) -> PlayerId {
        let taken: FxHashSet<PlayerId> = self.player_ids().collect();
        loop {
            let id = self.ids.next_id();
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new(GameRng::from_entropy())
    }
}
