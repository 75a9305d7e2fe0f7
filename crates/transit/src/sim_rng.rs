//! Seeded RNG for rider arrivals.
//!
//! Rider arrivals draw from this resource, never from `thread_rng()`, so the
//! same seed and the same tick sequence reproduce the same queues.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Restart the stream from `seed`, e.g. when a scenario is replayed.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }
}
