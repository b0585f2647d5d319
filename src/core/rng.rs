//! Deterministic player id allocation.
//!
//! Ids only need to be unique within one ledger, so a seeded ChaCha8 stream
//! is enough. Tests fix the seed; real sessions draw it from the OS.
//!
//! ```
//! use scorekeeper::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.next_id(), b.next_id());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::player::PlayerId;

/// Upper bound (exclusive) for raw ids: ids stay exact as JSON doubles.
const ID_LIMIT: u64 = 1 << 53;

/// Seeded id generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the next candidate id. Callers check it against ids in use.
    pub fn next_id(&mut self) -> PlayerId {
        PlayerId::new(self.inner.gen_range(1..ID_LIMIT))
    }
}
