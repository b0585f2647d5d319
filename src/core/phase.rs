//! Game phase.

use serde::{Deserialize, Serialize};

/// Phase of a game session.
///
/// `Setup -> Active -> Finished`; `reset` returns to `Setup` from anywhere.
/// Round entry is a sub-mode of `Active` and is not a phase.
///
/// Older saves used `ENTRY`/`PLAYING`/`RESULT`; those names still load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Registering players.
    #[default]
    #[serde(alias = "ENTRY")]
    Setup,
    /// Rounds are being played and committed.
    #[serde(alias = "PLAYING")]
    Active,
    /// A total reached the goal. Terminal until reset.
    #[serde(alias = "RESULT")]
    Finished,
}

impl Phase {
    /// True once the game has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Phase::Finished
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "Setup",
            Phase::Active => "Active",
            Phase::Finished => "Finished",
        };
        f.write_str(name)
    }
}
