//! Controller commands and their outcomes.
//!
//! Every controller operation has a `Command` variant so a presentation
//! layer can drive the game by name (key bindings, scripted input, replay)
//! through [`GameController::apply`](super::GameController::apply).

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Snapshot};

/// A controller operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Register a player (Setup only).
    AddPlayer { name: String },
    /// Setup -> Active, given at least one player.
    StartGame,
    /// Open score entry for the current round.
    OpenRoundEntry,
    /// Move entry focus to a player.
    Focus { player: PlayerId },
    /// Enter one digit (0-9) for the focused player.
    Digit { digit: u8 },
    /// Clear the focused player's value.
    Clear,
    /// Move focus to the next player.
    ConfirmAndAdvance,
    /// Close entry without committing.
    CancelEntry,
    /// Commit the staged round.
    Commit,
    /// Discard the game and return to Setup.
    Reset,
}

impl Command {
    /// Short operation name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddPlayer { .. } => "add_player",
            Command::StartGame => "start_game",
            Command::OpenRoundEntry => "open_round_entry",
            Command::Focus { .. } => "focus",
            Command::Digit { .. } => "digit",
            Command::Clear => "clear",
            Command::ConfirmAndAdvance => "confirm_and_advance",
            Command::CancelEntry => "cancel_entry",
            Command::Commit => "commit",
            Command::Reset => "reset",
        }
    }
}

/// Result of applying a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A guard rejected the command; nothing changed.
    Ignored,
    /// State changed.
    Applied,
    /// A round was committed; carries the resulting snapshot.
    Committed(Snapshot),
}

impl Outcome {
    /// True unless the command was ignored.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Outcome::Ignored)
    }

    pub(crate) fn from_flag(applied: bool) -> Self {
        if applied {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }
}
