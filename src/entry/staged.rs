//! Staged score entry for the open round.
//!
//! The buffer keeps one textual value per player plus a focus pointer.
//! Values are text so digits can be entered one at a time; the empty string
//! means "nothing entered". Nothing here is persisted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::PlayerId;

/// Longest staged value, in characters.
pub const MAX_STAGED_DIGITS: usize = 5;

/// One player's in-progress score text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagedValue(String);

impl StagedValue {
    /// The empty value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The staged text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Enter one digit.
    ///
    /// An empty value or a lone `"0"` is replaced by the digit. Otherwise the
    /// digit is appended unless the value already holds
    /// [`MAX_STAGED_DIGITS`] characters. Returns false for non-digits and
    /// for dropped digits.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let ch = char::from(b'0' + digit);
        if self.0.is_empty() || self.0 == "0" {
            self.0.clear();
            self.0.push(ch);
            return true;
        }
        if self.0.len() >= MAX_STAGED_DIGITS {
            return false;
        }
        self.0.push(ch);
        true
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl std::fmt::Display for StagedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Draft scores for the round being entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedEntry {
    /// Registration order, fixed when the entry opened.
    order: Vec<PlayerId>,
    values: FxHashMap<PlayerId, StagedValue>,
    focus: Option<PlayerId>,
}

impl StagedEntry {
    /// Open an entry with every player empty and focus on the first one.
    pub fn open(players: impl IntoIterator<Item = PlayerId>) -> Self {
        let order: Vec<PlayerId> = players.into_iter().collect();
        let values = order.iter().map(|id| (*id, StagedValue::empty())).collect();
        let focus = order.first().copied();
        Self { order, values, focus }
    }

    /// Currently focused player.
    #[must_use]
    pub fn focus(&self) -> Option<PlayerId> {
        self.focus
    }

    /// Players in entry order.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Staged value for a player.
    #[must_use]
    pub fn value(&self, player: PlayerId) -> Option<&StagedValue> {
        self.values.get(&player)
    }

    /// Iterate `(player, text)` pairs in entry order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &str)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.values.get(id).map(|v| (*id, v.as_str())))
    }

    /// Move focus to `player`. Unknown players are ignored.
    pub fn set_focus(&mut self, player: PlayerId) -> bool {
        if !self.values.contains_key(&player) {
            return false;
        }
        self.focus = Some(player);
        true
    }

    /// Enter a digit for the focused player.
    pub fn digit(&mut self, digit: u8) -> bool {
        let Some(value) = self.focused_value_mut() else {
            return false;
        };
        let accepted = value.push_digit(digit);
        trace!(digit, accepted, value = value.as_str(), "staged digit");
        accepted
    }

    /// Clear the focused player's value.
    pub fn clear(&mut self) -> bool {
        let Some(value) = self.focused_value_mut() else {
            return false;
        };
        value.clear();
        true
    }

    /// Move focus to the next player. Stays put on the last one.
    pub fn advance(&mut self) -> bool {
        let Some(current) = self.focus else {
            return false;
        };
        let Some(index) = self.order.iter().position(|id| *id == current) else {
            return false;
        };
        match self.order.get(index + 1) {
            Some(next) => {
                self.focus = Some(*next);
                true
            }
            None => false,
        }
    }

    fn focused_value_mut(&mut self) -> Option<&mut StagedValue> {
        let focus = self.focus?;
        self.values.get_mut(&focus)
    }
}
