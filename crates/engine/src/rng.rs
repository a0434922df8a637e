//! Injectable randomness for reward draws.
//!
//! Draw outcomes must be reproducible in tests, so the draw engine never
//! touches a global generator; it pulls pool positions from a [`DrawRng`]
//! handed to it at construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of draw randomness.
pub trait DrawRng: Send {
    /// Select a pool position in `0..pool_len`, uniform over positions.
    ///
    /// Callers guarantee `pool_len >= 1` (content pools are never empty).
    fn pick(&mut self, pool_len: usize) -> usize;
}

/// Entropy-seeded randomness for production draws.
#[derive(Debug)]
pub struct EntropyRng {
    inner: StdRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawRng for EntropyRng {
    fn pick(&mut self, pool_len: usize) -> usize {
        self.inner.gen_range(0..pool_len)
    }
}

/// Seeded, reproducible randomness (tests, replay of reported draws).
#[derive(Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DrawRng for SeededRng {
    fn pick(&mut self, pool_len: usize) -> usize {
        self.inner.gen_range(0..pool_len)
    }
}
