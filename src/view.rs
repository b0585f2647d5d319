//! Read-only projection of controller state for presentation.
//!
//! A renderer needs nothing but a `GameView`: phase, round, players with
//! totals and bar progress, the ranking and the staged entry. The view is
//! a plain serializable value, detached from the controller.

use serde::{Deserialize, Serialize};

use crate::core::{Color, GameConfig, Phase, Player, PlayerId, ScoreLedger};
use crate::entry::StagedEntry;

/// One player in registration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    pub scores: Vec<i64>,
    pub total: i64,
    /// Bar fill in `0.0..=1.0` (total over the visual max, clamped).
    pub progress: f64,
}

/// One row of the standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub id: PlayerId,
    pub name: String,
    pub total: i64,
    pub color: Color,
}

/// One player's staged value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRow {
    pub id: PlayerId,
    pub name: String,
    /// Raw staged text; empty when nothing was entered.
    pub value: String,
    /// `"-"` for an empty value, the text otherwise.
    pub display: String,
    pub focused: bool,
}

/// The open round entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    pub round: u32,
    pub focus: Option<PlayerId>,
    pub rows: Vec<EntryRow>,
}

/// Everything a presentation layer reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: Phase,
    pub round: u32,
    pub goal: i64,
    pub can_start: bool,
    pub players: Vec<PlayerView>,
    pub ranking: Vec<RankedEntry>,
    /// Names sharing the top total once the game is Finished.
    pub winners: Vec<String>,
    pub entry: Option<EntryView>,
}

fn progress(total: i64, visual_max: i64) -> f64 {
    let max = visual_max.max(1) as f64;
    (total as f64 / max).clamp(0.0, 1.0)
}

impl PlayerView {
    fn new(player: &Player, visual_max: i64) -> Self {
        let total = player.total();
        Self {
            id: player.id(),
            name: player.name().to_string(),
            color: player.color().clone(),
            scores: player.scores().iter().copied().collect(),
            total,
            progress: progress(total, visual_max),
        }
    }
}

impl EntryView {
    fn new(entry: &StagedEntry, ledger: &ScoreLedger) -> Self {
        let rows = entry
            .order()
            .iter()
            .filter_map(|id| {
                let player = ledger.player(*id)?;
                let value = entry.value(*id)?;
                Some(EntryRow {
                    id: *id,
                    name: player.name().to_string(),
                    value: value.as_str().to_string(),
                    display: value.to_string(),
                    focused: entry.focus() == Some(*id),
                })
            })
            .collect();
        Self {
            round: ledger.round(),
            focus: entry.focus(),
            rows,
        }
    }
}

impl GameView {
    /// Project ledger, phase and entry.
    #[must_use]
    pub fn new(ledger: &ScoreLedger, phase: Phase, entry: Option<&StagedEntry>, config: &GameConfig) -> Self {
        let players = ledger
            .players()
            .iter()
            .map(|p| PlayerView::new(p, config.visual_max_score))
            .collect();
        let ranking = ledger
            .ranking()
            .iter()
            .enumerate()
            .map(|(i, p)| RankedEntry {
                rank: i + 1,
                id: p.id(),
                name: p.name().to_string(),
                total: p.total(),
                color: p.color().clone(),
            })
            .collect();
        let winners = if phase.is_terminal() {
            ledger.leaders().iter().map(|p| p.name().to_string()).collect()
        } else {
            Vec::new()
        };

        Self {
            phase,
            round: ledger.round(),
            goal: config.goal_score,
            can_start: phase == Phase::Setup && !ledger.is_empty(),
            players,
            ranking,
            winners,
            entry: entry.map(|e| EntryView::new(e, ledger)),
        }
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }
}
