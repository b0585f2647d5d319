//! Game configuration types.
//!
//! The session is configured at startup by providing:
//! - `Palette`: ordered player colors, assigned by registration order
//! - `GameConfig`: goal score, palette, bar scale and id seed
//!
//! Neither the goal nor the colors are hardcoded in the ledger or the
//! controller; both read them from `GameConfig`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default goal score. The game ends once any total reaches it.
pub const DEFAULT_GOAL_SCORE: i64 = 200;

/// Default total at which a presentation score bar is full.
pub const DEFAULT_VISUAL_MAX_SCORE: i64 = 250;

/// Default storage key, used as the snapshot file stem.
pub const STORAGE_KEY: &str = "bg_score_app_v1";

/// Default player colors, in assignment order.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#3b82f6", // blue
    "#ef4444", // red
    "#10b981", // green
    "#f59e0b", // amber
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#06b6d4", // cyan
    "#f97316", // orange
];

/// A display color. Opaque to the engine; usually a CSS hex string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Create a color from any string form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a color list cannot be a palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette has no colors")]
    Empty,

    #[error("palette repeats color {0}")]
    Repeated(Color),
}

/// Fixed, ordered color palette.
///
/// Color assignment is a pure function of registration index, so a lost
/// color can always be re-derived. Serialized as a plain list of colors;
/// decoding applies the same checks as [`Palette::try_new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette from an ordered list of colors.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let colors: Vec<Color> = colors.into_iter().collect();
        assert!(!colors.is_empty(), "Palette must have at least 1 color");
        Self { colors }
    }

    /// Create a palette of distinct colors, rejecting empty lists.
    pub fn try_new(colors: impl IntoIterator<Item = Color>) -> Result<Self, PaletteError> {
        let colors: Vec<Color> = colors.into_iter().collect();
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        let mut seen = FxHashSet::default();
        for color in &colors {
            if !seen.insert(color) {
                return Err(PaletteError::Repeated(color.clone()));
            }
        }
        Ok(Self { colors })
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette has at least one color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for the player registered at `index` (0-based).
    #[must_use]
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()].clone()
    }

    /// Iterate over colors in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::try_new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.iter().map(|c| Color::new(*c)))
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// A round commit ends the game once any total is >= this value.
    pub goal_score: i64,

    /// Player colors, assigned by registration order.
    pub palette: Palette,

    /// Total at which a presentation score bar is drawn full.
    pub visual_max_score: i64,

    /// Seed for player id allocation. `None` draws one from the OS.
    pub id_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal_score: DEFAULT_GOAL_SCORE,
            palette: Palette::default(),
            visual_max_score: DEFAULT_VISUAL_MAX_SCORE,
            id_seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the goal score.
    #[must_use]
    pub fn with_goal_score(mut self, goal: i64) -> Self {
        self.goal_score = goal;
        self
    }

    /// Replace the palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the full-bar total. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_visual_max_score(mut self, max: i64) -> Self {
        self.visual_max_score = max.max(1);
        self
    }

    /// Fix the id seed for deterministic player ids.
    #[must_use]
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }
}
