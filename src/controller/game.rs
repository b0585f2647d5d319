//! The game state machine.
//!
//! ```text
//! Setup --start_game--> Active --commit (goal reached)--> Finished
//!   ^                     |  ^                               |
//!   +------ reset --------+  +-- commit (goal not reached)   |
//!   +------------------------- reset ------------------------+
//! ```
//!
//! Round entry is a sub-mode of `Active`: `open_round_entry` creates a
//! [`StagedEntry`], `commit` and `cancel_entry` drop it. Every guard failure
//! is a silent no-op reported as [`Outcome::Ignored`].
//!
//! The controller is owned by one session and every call runs to
//! completion. Reaching the goal moves to `Finished` inside `commit`; any
//! delayed reveal is the presentation layer's business.

use tracing::{debug, info, warn};

use super::command::{Command, Outcome};
use crate::core::{GameConfig, GameRng, Phase, PlayerId, ScoreLedger, Snapshot};
use crate::entry::StagedEntry;
use crate::persistence::{MemoryStore, SnapshotStore};
use crate::view::GameView;

/// Session-owned game controller.
pub struct GameController<S: SnapshotStore = MemoryStore> {
    config: GameConfig,
    ledger: ScoreLedger,
    phase: Phase,
    entry: Option<StagedEntry>,
    store: S,
}

impl<S: SnapshotStore> GameController<S> {
    /// Start a fresh game without reading the store.
    pub fn new(config: GameConfig, store: S) -> Self {
        let ledger = ScoreLedger::new(GameRng::from_seed(config.id_seed));
        Self {
            config,
            ledger,
            phase: Phase::Setup,
            entry: None,
            store,
        }
    }

    /// Resume the stored game, or start fresh if there is none.
    ///
    /// A store that fails to load is treated as empty.
    pub fn restore(config: GameConfig, mut store: S) -> Self {
        let loaded = match store.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "could not load saved game, starting fresh");
                None
            }
        };

        let ids = GameRng::from_seed(config.id_seed);
        let (ledger, phase) = match loaded {
            Some(snapshot) => snapshot.into_ledger(&config.palette, ids),
            None => (ScoreLedger::new(ids), Phase::Setup),
        };
        info!(%phase, players = ledger.len(), round = ledger.round(), "session restored");

        Self {
            config,
            ledger,
            phase,
            entry: None,
            store,
        }
    }

    // === Readers ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The score ledger.
    #[must_use]
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// The open round entry, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&StagedEntry> {
        self.entry.as_ref()
    }

    /// True while a round's scores are being entered.
    #[must_use]
    pub fn is_entry_open(&self) -> bool {
        self.entry.is_some()
    }

    /// True if `start_game` would succeed.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.phase == Phase::Setup && !self.ledger.is_empty()
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_ledger(&self.ledger, self.phase)
    }

    /// Read-only projection for presentation.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::new(&self.ledger, self.phase, self.entry.as_ref(), &self.config)
    }

    // === Operations ===

    /// Apply a command by name.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let op = command.name();
        let outcome = match command {
            Command::AddPlayer { name } => Outcome::from_flag(self.add_player(&name).is_some()),
            Command::StartGame => Outcome::from_flag(self.start_game()),
            Command::OpenRoundEntry => Outcome::from_flag(self.open_round_entry()),
            Command::Focus { player } => Outcome::from_flag(self.focus(player)),
            Command::Digit { digit } => Outcome::from_flag(self.digit(digit)),
            Command::Clear => Outcome::from_flag(self.clear()),
            Command::ConfirmAndAdvance => Outcome::from_flag(self.confirm_and_advance()),
            Command::CancelEntry => Outcome::from_flag(self.cancel_entry()),
            Command::Commit => self.commit().map_or(Outcome::Ignored, Outcome::Committed),
            Command::Reset => {
                self.reset();
                Outcome::Applied
            }
        };
        if !outcome.is_applied() {
            debug!(command = op, phase = %self.phase, "command ignored");
        }
        outcome
    }

    /// Register a player. Only allowed during Setup.
    pub fn add_player(&mut self, name: &str) -> Option<PlayerId> {
        if self.phase != Phase::Setup {
            return None;
        }
        let id = self.ledger.add_player(name, &self.config.palette)?;
        self.persist();
        Some(id)
    }

    /// Setup -> Active. Requires at least one player.
    pub fn start_game(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.phase = Phase::Active;
        info!(players = self.ledger.len(), goal = self.config.goal_score, "game started");
        self.persist();
        true
    }

    /// Open entry for the current round.
    ///
    /// Every player starts empty and the first player has focus. Ignored
    /// outside Active and while an entry is already open.
    pub fn open_round_entry(&mut self) -> bool {
        if self.phase != Phase::Active || self.entry.is_some() {
            return false;
        }
        self.entry = Some(StagedEntry::open(self.ledger.player_ids()));
        debug!(round = self.ledger.round(), "round entry opened");
        true
    }

    /// Move entry focus to `player`.
    pub fn focus(&mut self, player: PlayerId) -> bool {
        self.entry.as_mut().is_some_and(|entry| entry.set_focus(player))
    }

    /// Enter a digit for the focused player.
    pub fn digit(&mut self, digit: u8) -> bool {
        self.entry.as_mut().is_some_and(|entry| entry.digit(digit))
    }

    /// Clear the focused player's value.
    pub fn clear(&mut self) -> bool {
        self.entry.as_mut().is_some_and(StagedEntry::clear)
    }

    /// Focus the next player; stays on the last one.
    pub fn confirm_and_advance(&mut self) -> bool {
        self.entry.as_mut().is_some_and(StagedEntry::advance)
    }

    /// Close entry without touching the ledger.
    pub fn cancel_entry(&mut self) -> bool {
        let cancelled = self.entry.take().is_some();
        if cancelled {
            debug!(round = self.ledger.round(), "round entry cancelled");
        }
        cancelled
    }

    /// Commit the staged round.
    ///
    /// Records one score per player, closes the entry and moves to
    /// Finished if any total reached the goal. Returns the new snapshot, or
    /// `None` if no entry was open.
    pub fn commit(&mut self) -> Option<Snapshot> {
        if self.phase != Phase::Active {
            return None;
        }
        let entry = self.entry.take()?;
        let round = self.ledger.round();
        let scores = self.ledger.record_round(entry.iter());
        info!(round, ?scores, "round committed");

        if self.ledger.threshold_reached(self.config.goal_score) {
            self.phase = Phase::Finished;
            let winner = self.ledger.ranking().first().map(|p| p.name().to_string());
            info!(round, goal = self.config.goal_score, winner = winner.as_deref(), "game finished");
        }

        let snapshot = self.snapshot();
        self.save(&snapshot);
        Some(snapshot)
    }

    /// Discard the game, clear storage and return to Setup.
    ///
    /// Allowed from any phase; asking the user to confirm is up to the
    /// caller.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.entry = None;
        self.phase = Phase::Setup;
        if let Err(err) = self.store.clear() {
            warn!(%err, "could not clear saved game");
        }
        info!("game reset");
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        self.save(&snapshot);
    }

    fn save(&mut self, snapshot: &Snapshot) {
        if let Err(err) = self.store.save(snapshot) {
            warn!(%err, "could not save game, continuing");
        }
    }
}

impl Default for GameController<MemoryStore> {
    fn default() -> Self {
        Self::new(GameConfig::default(), MemoryStore::new())
    }
}
